//! Core types for branch records and projects.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Columns of the branch edge export, in positional order.
pub const EDGE_COLUMNS: [&str; 6] = [
    "Id",
    "OriginalProjectId",
    "BranchedOnScanId",
    "BranchedProjectId",
    "Timestamp",
    "Status",
];

/// Columns of the project export, in positional order.
pub const PROJECT_COLUMNS: [&str; 8] = [
    "Name",
    "OpenedAt",
    "OpenedBy",
    "is_deprecated",
    "Owner",
    "Owning_Team",
    "PresetId",
    "ID",
];

/// Raw `is_deprecated` value marking a deleted project.
pub const DEPRECATED_FLAG: &str = "1";

/// Identifier of a project in the source system.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectId(pub i64);

impl fmt::Debug for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProjectId({})", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One branch event: `original_project_id` was branched into
/// `branched_project_id` at scan `branched_on_scan_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchEdge {
    pub id: i64,
    pub original_project_id: ProjectId,
    pub branched_on_scan_id: i64,
    pub branched_project_id: ProjectId,
    pub timestamp: String,
    pub status: String,
}

/// Project metadata, one per unique ID.
///
/// Field order matches the export columns and drives both the tree label
/// and the report row layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Project {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "OpenedAt")]
    pub opened_at: String,

    #[serde(rename = "OpenedBy")]
    pub opened_by: String,

    /// Raw flag; only the literal `"1"` means deprecated.
    #[serde(rename = "is_deprecated")]
    pub is_deprecated: String,

    #[serde(rename = "Owner")]
    pub owner: String,

    #[serde(rename = "Owning_Team")]
    pub owning_team: String,

    #[serde(rename = "PresetId")]
    pub preset_id: i64,

    #[serde(rename = "ID")]
    pub id: ProjectId,
}

impl Project {
    /// Whether the project has been deleted in the source system.
    pub fn is_deprecated(&self) -> bool {
        self.is_deprecated == DEPRECATED_FLAG
    }

    /// Flat `key: value, key: value` rendering used as the tree label.
    pub fn label(&self) -> String {
        let values = [
            self.name.clone(),
            self.opened_at.clone(),
            self.opened_by.clone(),
            self.is_deprecated.clone(),
            self.owner.clone(),
            self.owning_team.clone(),
            self.preset_id.to_string(),
            self.id.to_string(),
        ];

        PROJECT_COLUMNS
            .iter()
            .zip(values.iter())
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// All known projects keyed by ID.
pub type Projects = HashMap<ProjectId, Project>;
