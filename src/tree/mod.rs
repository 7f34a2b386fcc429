//! Branch tree construction, pruning and rendering.
//!
//! Projects hang under a synthetic root in the order edges introduce
//! them. A project is placed once and never moves; deprecated leaves are
//! pruned until the tree stops changing.

mod builder;
mod forest;
mod prune;
mod render;

pub use builder::{BuildReport, SkipReason, SkippedEdge};
pub use forest::{BranchTree, NodeKey, TreeNode, ROOT_LABEL};
pub use prune::{prune_deprecated_leaves, PruneStats};
pub use render::{render, to_json, LineStyle, RenderOptions, SiblingOrder};
