//! Report of projects that never took part in a branch.

use crate::error::{Result, TreeError};
use crate::types::{BranchEdge, Project, ProjectId, Projects, PROJECT_COLUMNS};
use csv::{Terminator, WriterBuilder};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Every project ID named by an edge, as origin or as branch.
pub fn branched_ids(edges: &[BranchEdge]) -> BTreeSet<ProjectId> {
    edges
        .iter()
        .flat_map(|edge| [edge.original_project_id, edge.branched_project_id])
        .collect()
}

/// Known projects absent from every edge, ascending by ID, deprecated
/// ones left out.
pub fn unbranched_projects<'a>(edges: &[BranchEdge], projects: &'a Projects) -> Vec<&'a Project> {
    let branched = branched_ids(edges);
    let known: BTreeSet<ProjectId> = projects.keys().copied().collect();

    let mut skipped_deprecated = 0usize;
    let rows: Vec<&Project> = known
        .difference(&branched)
        .filter_map(|id| projects.get(id))
        .filter(|project| {
            let keep = !project.is_deprecated();
            if !keep {
                skipped_deprecated += 1;
            }
            keep
        })
        .collect();

    debug!(
        known = known.len(),
        branched = branched.len(),
        reported = rows.len(),
        skipped_deprecated,
        "computed unbranched projects"
    );
    rows
}

/// Name used in diagnostics when the destination has no path.
const REPORT_DESTINATION: &str = "unbranched report";

/// Write the header and one row per project. Returns the row count.
pub fn write_report<W: Write>(writer: W, rows: &[&Project]) -> Result<usize> {
    write_rows(writer, rows, REPORT_DESTINATION)
}

/// Write the report to `path`, replacing any existing file.
pub fn write_report_file(path: impl AsRef<Path>, rows: &[&Project]) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| TreeError::io(path, e))?;
    write_rows(file, rows, &path.display().to_string())
}

fn write_rows<W: Write>(writer: W, rows: &[&Project], destination: &str) -> Result<usize> {
    let csv_err = |e: csv::Error| TreeError::csv(destination, e);
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(PROJECT_COLUMNS).map_err(csv_err)?;
    for project in rows {
        csv_writer.serialize(project).map_err(csv_err)?;
    }
    csv_writer
        .flush()
        .map_err(|e| csv_err(csv::Error::from(e)))?;
    Ok(rows.len())
}
