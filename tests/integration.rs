//! Integration tests for a full run over CSV exports.

use project_branch_tree::{
    run, Config, LineStyle, ProjectId, RenderOptions, RunSummary, SiblingOrder,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

fn config_in(dir: &TempDir) -> Config {
    Config {
        edges_path: dir.path().join("1.csv"),
        projects_path: dir.path().join("2.csv"),
        tree_output: dir.path().join("branched_projects_tree.txt"),
        report_output: dir.path().join("project_without_being_branched.csv"),
        json_output: None,
        render: RenderOptions::default(),
        echo_tree: false,
    }
}

fn label(name: &str, deprecated: &str, id: i64) -> String {
    format!(
        "Name: {name}, OpenedAt: 2020-01-01, OpenedBy: admin, is_deprecated: {deprecated}, \
         Owner: admin, Owning_Team: /CxServer, PresetId: 36, ID: {id}"
    )
}

fn project_row(name: &str, deprecated: &str, id: i64) -> String {
    format!("{name},2020-01-01,admin,{deprecated},admin,/CxServer,36,{id}\n")
}

// --- Realistic Workflow Tests ---

#[test]
fn test_single_branch_with_deprecated_child() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    write(&config.edges_path, "1,1,100,2,2020-02-02 10:00:00,1\n");
    write(
        &config.projects_path,
        &[
            project_row("one", "0", 1),
            project_row("two", "1", 2),
            project_row("three", "0", 3),
        ]
        .concat(),
    );

    let summary = run(&config).unwrap();

    let tree = fs::read_to_string(&config.tree_output).unwrap();
    assert_eq!(tree, format!("Root\n└── {}\n", label("one", "0", 1)));

    let report = fs::read_to_string(&config.report_output).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Name,OpenedAt,OpenedBy,is_deprecated,Owner,Owning_Team,PresetId,ID",
            "three,2020-01-01,admin,0,admin,/CxServer,36,3",
        ]
    );

    assert_eq!(
        summary,
        RunSummary {
            edges: 1,
            projects: 3,
            tree_nodes_built: 2,
            skipped_edges: 0,
            pruned: 1,
            prune_rounds: 2,
            tree_nodes_remaining: 1,
            unbranched_reported: 1,
        }
    );
}

#[test]
fn test_branch_chains_and_bom_exports() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    write(
        &config.edges_path,
        "\u{feff}1,10,500,11,2021-01-01,1\n2,11,501,12,2021-01-02,1\n3,10,502,13,2021-01-03,1\n4,20,503,21,2021-01-04,1\n",
    );
    write(
        &config.projects_path,
        &[
            format!("\u{feff}{}", project_row("alpha", "0", 10)),
            project_row("alpha-b1", "0", 11),
            project_row("alpha-b1-b1", "1", 12),
            project_row("alpha-b2", "1", 13),
            project_row("beta", "1", 20),
            project_row("beta-b1", "1", 21),
            project_row("gamma", "0", 30),
            project_row("delta", "1", 31),
            project_row("epsilon", "0", 5),
        ]
        .concat(),
    );

    let summary = run(&config).unwrap();

    // 12 and 13 are deprecated leaves, the whole beta chain is deprecated.
    let tree = fs::read_to_string(&config.tree_output).unwrap();
    assert_eq!(
        tree,
        format!(
            "Root\n└── {}\n    └── {}\n",
            label("alpha", "0", 10),
            label("alpha-b1", "0", 11)
        )
    );
    assert_eq!(summary.pruned, 4);
    assert_eq!(summary.tree_nodes_built, 6);

    let report = fs::read_to_string(&config.report_output).unwrap();
    let ids: Vec<&str> = report
        .lines()
        .skip(1)
        .map(|line| line.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(ids, vec!["5", "30"]);
}

#[test]
fn test_outputs_are_overwritten() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    write(&config.edges_path, "1,1,100,2,ts,1\n");
    write(
        &config.projects_path,
        &[project_row("one", "0", 1), project_row("two", "0", 2)].concat(),
    );
    write(&config.tree_output, "stale tree content that is much longer than the new one\n".repeat(50).as_str());
    write(&config.report_output, "stale\n");

    run(&config).unwrap();

    let tree = fs::read_to_string(&config.tree_output).unwrap();
    assert!(!tree.contains("stale"));
    assert!(tree.starts_with("Root\n"));
    let report = fs::read_to_string(&config.report_output).unwrap();
    assert!(!report.contains("stale"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    write(&config.edges_path, "1,3,1,4,ts,1\n2,3,1,1,ts,1\n3,1,1,2,ts,1\n");
    write(
        &config.projects_path,
        &[
            project_row("c", "0", 3),
            project_row("d", "0", 4),
            project_row("a", "0", 1),
            project_row("b", "1", 2),
        ]
        .concat(),
    );

    run(&config).unwrap();
    let first = fs::read(&config.tree_output).unwrap();
    run(&config).unwrap();
    let second = fs::read(&config.tree_output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_json_export_and_insertion_order() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.json_output = Some(dir.path().join("tree.json"));
    config.render = RenderOptions {
        line_style: LineStyle::Ascii,
        sibling_order: SiblingOrder::Insertion,
    };

    write(&config.edges_path, "1,2,1,3,ts,1\n2,1,1,4,ts,1\n");
    write(
        &config.projects_path,
        &[
            project_row("b", "0", 2),
            project_row("c", "0", 3),
            project_row("a", "0", 1),
            project_row("d", "0", 4),
        ]
        .concat(),
    );

    run(&config).unwrap();

    let tree = fs::read_to_string(&config.tree_output).unwrap();
    let lines: Vec<&str> = tree.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("|-- Name: b,"));
    assert!(lines[2].starts_with("|   +-- Name: c,"));
    assert!(lines[3].starts_with("+-- Name: a,"));
    assert!(lines[4].starts_with("    +-- Name: d,"));

    let json = fs::read_to_string(dir.path().join("tree.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["children"][0]["id"], 2);
    assert_eq!(value["children"][1]["children"][0]["id"], 4);
}

#[test]
fn test_skipped_edges_are_counted() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    // 2 is placed under 1, then edge 2 claims it as a branch of 3.
    write(&config.edges_path, "1,1,1,2,ts,1\n2,3,1,2,ts,1\n");
    write(
        &config.projects_path,
        &[
            project_row("a", "0", 1),
            project_row("b", "0", 2),
            project_row("c", "0", 3),
        ]
        .concat(),
    );

    let summary = run(&config).unwrap();
    assert_eq!(summary.skipped_edges, 1);
    assert_eq!(summary.tree_nodes_built, 3);

    let tree = fs::read_to_string(&config.tree_output).unwrap();
    assert_eq!(tree.matches(&format!("ID: {}", ProjectId(2))).count(), 1);
}
