//! # Project Branch Tree
//!
//! Builds a hierarchical view of project branching from two headerless
//! CSV exports: a branch edge list and a project table.
//!
//! ## Core Concepts
//!
//! - **Edges**: one row per branch event, origin project to branched project
//! - **Projects**: metadata keyed by ID, with a raw `is_deprecated` flag
//! - **Tree**: projects under a synthetic `Root`, placed once in edge order
//! - **Pruning**: deprecated leaves removed repeatedly until stable
//! - **Report**: known projects that never appear in any edge
//!
//! ## Example
//!
//! ```ignore
//! use project_branch_tree::{load_edges, load_projects, prune_deprecated_leaves, render};
//! use project_branch_tree::{BranchTree, RenderOptions};
//!
//! let edges = load_edges("1.csv")?;
//! let projects = load_projects("2.csv")?;
//!
//! let (mut tree, _report) = BranchTree::build(&edges, &projects)?;
//! prune_deprecated_leaves(&mut tree);
//! println!("{}", render(&tree, &RenderOptions::default()));
//! ```

pub mod error;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod tree;
pub mod types;

// Re-exports
pub use error::{ParseFailure, Result, TreeError};
pub use pipeline::{run, Config, RunSummary};
pub use records::{load_edges, load_projects, parse_edges, parse_projects};
pub use report::{branched_ids, unbranched_projects, write_report, write_report_file};
pub use tree::{
    prune_deprecated_leaves, render, to_json, BranchTree, BuildReport, LineStyle, NodeKey,
    PruneStats, RenderOptions, SiblingOrder, SkipReason, SkippedEdge, TreeNode, ROOT_LABEL,
};
pub use types::*;
