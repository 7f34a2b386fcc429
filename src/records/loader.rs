//! Positional CSV loading of branch edges and projects.

use crate::error::{ParseFailure, Result, TreeError};
use crate::types::{BranchEdge, Project, ProjectId, Projects, EDGE_COLUMNS, PROJECT_COLUMNS};
use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// UTF-8 byte-order marker some exporters prepend.
const BOM: char = '\u{feff}';

/// Load the branch edge export from a file.
pub fn load_edges(path: impl AsRef<Path>) -> Result<Vec<BranchEdge>> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| TreeError::io(path, e))?;
    parse_edges(file, &path.display().to_string())
}

/// Load the project export from a file.
pub fn load_projects(path: impl AsRef<Path>) -> Result<Projects> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| TreeError::io(path, e))?;
    parse_projects(file, &path.display().to_string())
}

/// Parse branch edges from any reader.
///
/// Columns: `Id, OriginalProjectId, BranchedOnScanId, BranchedProjectId,
/// Timestamp, Status`. There is no header row. A row with too few columns
/// is a parse failure.
pub fn parse_edges<R: Read>(reader: R, source_name: &str) -> Result<Vec<BranchEdge>> {
    let records = read_records(reader, source_name)?;
    let mut edges = Vec::with_capacity(records.len());

    for (line, record) in &records {
        let fields = Fields {
            record,
            columns: &EDGE_COLUMNS,
            short_row: ShortRow::Parse,
            source_name,
            row: *line,
        };
        fields.check_width()?;

        edges.push(BranchEdge {
            id: fields.int(0)?,
            original_project_id: ProjectId(fields.int(1)?),
            branched_on_scan_id: fields.int(2)?,
            branched_project_id: ProjectId(fields.int(3)?),
            timestamp: fields.text(4),
            status: fields.text(5),
        });
    }

    debug!(source = source_name, edges = edges.len(), "loaded branch edges");
    Ok(edges)
}

/// Parse projects from any reader, keyed by the trailing `ID` column.
///
/// Columns: `Name, OpenedAt, OpenedBy, is_deprecated, Owner, Owning_Team,
/// PresetId, ID`. A later row with the same ID replaces an earlier one.
/// A row with too few columns is a schema error.
pub fn parse_projects<R: Read>(reader: R, source_name: &str) -> Result<Projects> {
    let records = read_records(reader, source_name)?;
    let mut projects = Projects::with_capacity(records.len());
    let mut overwritten = 0usize;

    for (line, record) in &records {
        let fields = Fields {
            record,
            columns: &PROJECT_COLUMNS,
            short_row: ShortRow::Schema,
            source_name,
            row: *line,
        };
        fields.check_width()?;

        let project = Project {
            name: fields.text(0),
            opened_at: fields.text(1),
            opened_by: fields.text(2),
            is_deprecated: fields.text(3),
            owner: fields.text(4),
            owning_team: fields.text(5),
            preset_id: fields.int(6)?,
            id: ProjectId(fields.int(7)?),
        };

        if projects.insert(project.id, project).is_some() {
            overwritten += 1;
        }
    }

    debug!(
        source = source_name,
        projects = projects.len(),
        overwritten,
        "loaded projects"
    );
    Ok(projects)
}

/// Read every CSV record with the 1-based line it starts on, stripping a
/// leading byte-order marker.
fn read_records<R: Read>(mut reader: R, source_name: &str) -> Result<Vec<(usize, StringRecord)>> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| TreeError::io(source_name, e))?;
    let text = text.strip_prefix(BOM).unwrap_or(&text);

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut lines = LineCursor::new(text.as_bytes());
    let mut records = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| TreeError::csv(source_name, e))?;
        let line = match record.position() {
            Some(pos) => lines.line_at(pos.byte() as usize),
            None => idx + 1,
        };
        records.push((line, record));
    }
    Ok(records)
}

/// Maps record byte offsets to line numbers.
///
/// The reader skips blank lines and lets quoted fields span lines, so the
/// record ordinal drifts from the line a reader of the file would look at.
/// Offsets must be queried in increasing order.
struct LineCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let mut start = offset.min(self.bytes.len());
        // A record never starts on a line break; skip any blank lines the
        // reader consumed ahead of it.
        while start < self.bytes.len() && matches!(self.bytes[start], b'\r' | b'\n') {
            start += 1;
        }
        if start > self.offset {
            self.line += self.bytes[self.offset..start]
                .iter()
                .filter(|b| **b == b'\n')
                .count();
            self.offset = start;
        }
        self.line
    }
}

/// How a source reports a row with too few columns.
#[derive(Clone, Copy)]
enum ShortRow {
    Parse,
    Schema,
}

/// Positional view over one row, carrying enough context for diagnostics.
struct Fields<'a> {
    record: &'a StringRecord,
    columns: &'a [&'static str],
    short_row: ShortRow,
    source_name: &'a str,
    row: usize,
}

impl Fields<'_> {
    fn check_width(&self) -> Result<()> {
        let expected = self.columns.len();
        let found = self.record.len();
        if found >= expected {
            return Ok(());
        }

        let source_name = self.source_name.to_string();
        let row = self.row;
        Err(match self.short_row {
            ShortRow::Parse => TreeError::Parse {
                source_name,
                row,
                failure: ParseFailure::TooFewColumns { expected, found },
            },
            ShortRow::Schema => TreeError::Schema {
                source_name,
                row,
                expected,
                found,
            },
        })
    }

    fn text(&self, index: usize) -> String {
        self.record.get(index).unwrap_or_default().to_string()
    }

    fn int(&self, index: usize) -> Result<i64> {
        let raw = self.record.get(index).unwrap_or_default();
        raw.trim().parse::<i64>().map_err(|_| TreeError::Parse {
            source_name: self.source_name.to_string(),
            row: self.row,
            failure: ParseFailure::NotAnInteger {
                column: self.columns[index],
                value: raw.to_string(),
            },
        })
    }
}
