use clap::{Parser, ValueEnum};
use project_branch_tree::{run, Config, LineStyle, RenderOptions, SiblingOrder};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LineStyleArg {
    Ascii,
    AsciiEx,
    AsciiExr,
}

impl From<LineStyleArg> for LineStyle {
    fn from(arg: LineStyleArg) -> Self {
        match arg {
            LineStyleArg::Ascii => LineStyle::Ascii,
            LineStyleArg::AsciiEx => LineStyle::AsciiEx,
            LineStyleArg::AsciiExr => LineStyle::AsciiExr,
        }
    }
}

/// Build the project branch tree and the list of never-branched projects.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Branch edge export (Id, OriginalProjectId, BranchedOnScanId,
    /// BranchedProjectId, Timestamp, Status).
    #[arg(long, env = "BRANCH_TREE_EDGES", default_value = "1.csv")]
    edges: PathBuf,

    /// Project export (Name, OpenedAt, OpenedBy, is_deprecated, Owner,
    /// Owning_Team, PresetId, ID).
    #[arg(long, env = "BRANCH_TREE_PROJECTS", default_value = "2.csv")]
    projects: PathBuf,

    /// Where to write the rendered tree.
    #[arg(long, env = "BRANCH_TREE_OUT", default_value = "branched_projects_tree.txt")]
    tree_out: PathBuf,

    /// Where to write the unbranched project report.
    #[arg(
        long,
        env = "BRANCH_TREE_REPORT",
        default_value = "project_without_being_branched.csv"
    )]
    report_out: PathBuf,

    /// Also export the pruned tree as JSON.
    #[arg(long)]
    json_out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LineStyleArg::AsciiEx)]
    line_style: LineStyleArg,

    /// Keep siblings in edge order instead of sorting by label.
    #[arg(long)]
    insertion_order: bool,

    /// Print the rendered tree to stdout.
    #[arg(long)]
    print: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            edges_path: args.edges,
            projects_path: args.projects,
            tree_output: args.tree_out,
            report_output: args.report_out,
            json_output: args.json_out,
            render: RenderOptions {
                line_style: args.line_style.into(),
                sibling_order: if args.insertion_order {
                    SiblingOrder::Insertion
                } else {
                    SiblingOrder::Label
                },
            },
            echo_tree: args.print,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from(Args::parse());
    match run(&config) {
        Ok(summary) => {
            info!(?summary, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
