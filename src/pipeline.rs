//! End-to-end run: load both exports, write the tree and the report.

use crate::error::{Result, TreeError};
use crate::records::{load_edges, load_projects};
use crate::report::{unbranched_projects, write_report_file};
use crate::tree::{prune_deprecated_leaves, render, to_json, BranchTree, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Run configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Branch edge export.
    pub edges_path: PathBuf,

    /// Project export.
    pub projects_path: PathBuf,

    /// Rendered tree destination (overwritten).
    pub tree_output: PathBuf,

    /// Unbranched project report destination (overwritten).
    pub report_output: PathBuf,

    /// Optional JSON export of the pruned tree.
    pub json_output: Option<PathBuf>,

    /// Tree rendering options.
    pub render: RenderOptions,

    /// Also print the rendered tree to stdout.
    pub echo_tree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edges_path: PathBuf::from("1.csv"),
            projects_path: PathBuf::from("2.csv"),
            tree_output: PathBuf::from("branched_projects_tree.txt"),
            report_output: PathBuf::from("project_without_being_branched.csv"),
            json_output: None,
            render: RenderOptions::default(),
            echo_tree: false,
        }
    }
}

/// Counts describing a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub edges: usize,
    pub projects: usize,
    pub tree_nodes_built: usize,
    pub skipped_edges: usize,
    pub pruned: usize,
    pub prune_rounds: usize,
    pub tree_nodes_remaining: usize,
    pub unbranched_reported: usize,
}

/// Load both exports, then write the pruned tree and the unbranched report.
pub fn run(config: &Config) -> Result<RunSummary> {
    let edges = load_edges(&config.edges_path)?;
    let projects = load_projects(&config.projects_path)?;
    info!(
        edges = edges.len(),
        projects = projects.len(),
        "loaded exports"
    );

    let (mut tree, build) = BranchTree::build(&edges, &projects)?;
    let tree_nodes_built = tree.len();
    let prune = prune_deprecated_leaves(&mut tree);
    info!(
        built = tree_nodes_built,
        skipped_edges = build.skipped.len(),
        pruned = prune.removed.len(),
        remaining = tree.len(),
        "branch tree ready"
    );

    let text = render(&tree, &config.render);
    if config.echo_tree {
        print!("{}", text);
    }
    write_text(&config.tree_output, &text)?;

    if let Some(json_path) = &config.json_output {
        let json = to_json(&tree, config.render.sibling_order)?;
        write_text(json_path, &json)?;
    }

    let rows = unbranched_projects(&edges, &projects);
    let unbranched_reported = write_report_file(&config.report_output, &rows)?;
    info!(
        rows = unbranched_reported,
        path = %config.report_output.display(),
        "wrote unbranched project report"
    );

    Ok(RunSummary {
        edges: edges.len(),
        projects: projects.len(),
        tree_nodes_built,
        skipped_edges: build.skipped.len(),
        pruned: prune.removed.len(),
        prune_rounds: prune.rounds,
        tree_nodes_remaining: tree.len(),
        unbranched_reported,
    })
}

/// Replace `path` with `contents`.
fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| TreeError::io(path, e))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
