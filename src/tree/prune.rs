//! Iterative removal of deprecated leaves.

use super::forest::{BranchTree, NodeKey};
use crate::types::ProjectId;
use tracing::debug;

/// Outcome of a pruning run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PruneStats {
    /// Leaf scans performed.
    pub rounds: usize,
    /// Removed projects, in removal order.
    pub removed: Vec<ProjectId>,
}

/// Remove deprecated leaves until none remain.
///
/// Each round snapshots the current leaves and drops the deprecated ones,
/// which may expose their parents as new leaves for the next round. The
/// tree depth bounds the number of rounds needed; a round that removes
/// nothing ends the run early. The root is never considered.
pub fn prune_deprecated_leaves(tree: &mut BranchTree) -> PruneStats {
    let max_rounds = tree.depth();
    let mut stats = PruneStats::default();

    while stats.rounds < max_rounds && !tree.is_empty() {
        stats.rounds += 1;

        let doomed: Vec<ProjectId> = tree
            .leaves()
            .into_iter()
            .filter(|id| {
                tree.node(NodeKey::Project(*id))
                    .is_some_and(|node| node.deprecated)
            })
            .collect();

        if doomed.is_empty() {
            break;
        }

        for id in doomed {
            if tree.remove_leaf(id).is_some() {
                stats.removed.push(id);
            }
        }
    }

    debug!(
        rounds = stats.rounds,
        removed = stats.removed.len(),
        remaining = tree.len(),
        "pruned deprecated leaves"
    );
    stats
}
