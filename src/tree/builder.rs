//! Construction of a branch tree from the edge list.

use super::forest::{BranchTree, NodeKey};
use crate::error::{Result, TreeError};
use crate::types::{BranchEdge, Project, ProjectId, Projects};
use tracing::{debug, warn};

/// Why an edge did not add a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The branched project was already placed under `existing_parent`;
    /// placed projects are never re-parented.
    AlreadyPlaced { existing_parent: NodeKey },
    /// The edge branches a project into itself.
    SelfBranch,
}

/// An edge whose branched project was left where it already was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEdge {
    /// 1-based row of the edge in its source.
    pub edge_row: usize,
    pub edge_id: i64,
    pub original_project_id: ProjectId,
    pub branched_project_id: ProjectId,
    pub reason: SkipReason,
}

/// Diagnostics collected while building.
#[derive(Clone, Debug, Default)]
pub struct BuildReport {
    /// Number of project nodes placed.
    pub placed: usize,
    /// Edges that did not attach their branched project.
    pub skipped: Vec<SkippedEdge>,
}

impl BranchTree {
    /// Build the tree from edges in input order.
    ///
    /// The first edge naming a project as origin places it under the root,
    /// unless it was already placed as someone's branch. A placed project
    /// never moves. Fails with [`TreeError::MissingProject`] if an edge
    /// references an unknown project.
    pub fn build(edges: &[BranchEdge], projects: &Projects) -> Result<(BranchTree, BuildReport)> {
        let mut tree = BranchTree::new();
        let mut report = BuildReport::default();

        for (idx, edge) in edges.iter().enumerate() {
            let edge_row = idx + 1;
            let origin = lookup(projects, edge.original_project_id, edge_row)?;
            let branched = lookup(projects, edge.branched_project_id, edge_row)?;

            if !tree.contains(origin.id) && tree.attach(NodeKey::Root, origin) {
                report.placed += 1;
            }

            let reason = if origin.id == branched.id {
                Some(SkipReason::SelfBranch)
            } else {
                tree.parent(branched.id)
                    .map(|existing_parent| SkipReason::AlreadyPlaced { existing_parent })
            };

            match reason {
                None => {
                    if tree.attach(NodeKey::Project(origin.id), branched) {
                        report.placed += 1;
                    }
                }
                Some(reason) => {
                    warn!(
                        edge_row,
                        edge_id = edge.id,
                        original = %origin.id,
                        branched = %branched.id,
                        ?reason,
                        "branch edge not attached; project keeps its first position"
                    );
                    report.skipped.push(SkippedEdge {
                        edge_row,
                        edge_id: edge.id,
                        original_project_id: origin.id,
                        branched_project_id: branched.id,
                        reason,
                    });
                }
            }
        }

        debug!(
            edges = edges.len(),
            placed = report.placed,
            skipped = report.skipped.len(),
            depth = tree.depth(),
            "built branch tree"
        );
        Ok((tree, report))
    }
}

fn lookup(projects: &Projects, project_id: ProjectId, edge_row: usize) -> Result<&Project> {
    projects
        .get(&project_id)
        .ok_or(TreeError::MissingProject {
            project_id,
            edge_row,
        })
}
