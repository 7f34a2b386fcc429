//! Arena-backed tree of projects under a synthetic root.

use crate::types::{Project, ProjectId};
use std::collections::HashMap;
use std::fmt;

/// Label of the synthetic root node.
pub const ROOT_LABEL: &str = "Root";

/// Identifies a node: the synthetic root or a real project.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Root,
    Project(ProjectId),
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Root => write!(f, "Root"),
            NodeKey::Project(id) => write!(f, "Node({})", id.0),
        }
    }
}

impl From<ProjectId> for NodeKey {
    fn from(id: ProjectId) -> Self {
        NodeKey::Project(id)
    }
}

/// A single node with its display label.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub key: NodeKey,
    pub label: String,
    /// Copied from the project at placement time; false for the root.
    pub deprecated: bool,
    pub parent: Option<NodeKey>,
    /// Children in insertion order.
    pub children: Vec<ProjectId>,
}

/// Rooted forest of branch relationships.
///
/// Every project appears at most once and has exactly one parent, which
/// is either another project node or the root.
#[derive(Clone, Debug)]
pub struct BranchTree {
    nodes: HashMap<NodeKey, TreeNode>,
}

impl Default for BranchTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchTree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeKey::Root,
            TreeNode {
                key: NodeKey::Root,
                label: ROOT_LABEL.to_string(),
                deprecated: false,
                parent: None,
                children: Vec::new(),
            },
        );
        Self { nodes }
    }

    /// The root node.
    pub fn root(&self) -> &TreeNode {
        &self.nodes[&NodeKey::Root]
    }

    /// Get a node by key.
    pub fn node(&self, key: impl Into<NodeKey>) -> Option<&TreeNode> {
        self.nodes.get(&key.into())
    }

    /// Whether a project has been placed in the tree.
    pub fn contains(&self, id: ProjectId) -> bool {
        self.nodes.contains_key(&NodeKey::Project(id))
    }

    /// Children of a node, empty if the node is absent.
    pub fn children(&self, key: impl Into<NodeKey>) -> &[ProjectId] {
        self.nodes
            .get(&key.into())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of a project node.
    pub fn parent(&self, id: ProjectId) -> Option<NodeKey> {
        self.nodes.get(&NodeKey::Project(id)).and_then(|n| n.parent)
    }

    /// Number of project nodes (the root is not counted).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True when nothing hangs below the root.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distance from the root; the root is level 0.
    pub fn level_of(&self, id: ProjectId) -> Option<usize> {
        let mut current = self.nodes.get(&NodeKey::Project(id))?;
        let mut level = 0;
        while let Some(parent) = current.parent {
            level += 1;
            current = self.nodes.get(&parent)?;
        }
        Some(level)
    }

    /// Maximum level of any node; 0 for a root-only tree.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(NodeKey::Root, 0usize)];
        while let Some((key, level)) = stack.pop() {
            max = max.max(level);
            for child in self.children(key) {
                stack.push((NodeKey::Project(*child), level + 1));
            }
        }
        max
    }

    /// Project nodes without children, in pre-order.
    pub fn leaves(&self) -> Vec<ProjectId> {
        self.pre_order()
            .into_iter()
            .filter(|id| self.children(*id).is_empty())
            .collect()
    }

    /// All project nodes in pre-order, children visited in insertion order.
    pub fn pre_order(&self) -> Vec<ProjectId> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<ProjectId> = self.root().children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Attach a project under `parent`.
    ///
    /// Returns false without changing anything if the project is already
    /// placed or the parent is absent.
    pub(crate) fn attach(&mut self, parent: NodeKey, project: &Project) -> bool {
        let key = NodeKey::Project(project.id);
        if self.nodes.contains_key(&key) {
            return false;
        }
        match self.nodes.get_mut(&parent) {
            Some(parent_node) => parent_node.children.push(project.id),
            None => return false,
        }

        self.nodes.insert(
            key,
            TreeNode {
                key,
                label: project.label(),
                deprecated: project.is_deprecated(),
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        true
    }

    /// Remove a project node that has no children.
    ///
    /// Returns the removed node, or None if the project is absent or still
    /// has children.
    pub fn remove_leaf(&mut self, id: ProjectId) -> Option<TreeNode> {
        let key = NodeKey::Project(id);
        if !self.nodes.get(&key)?.children.is_empty() {
            return None;
        }

        let node = self.nodes.remove(&key)?;
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|child| *child != id);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: i64, deprecated: bool) -> Project {
        Project {
            name: format!("p{}", id),
            opened_at: String::new(),
            opened_by: String::new(),
            is_deprecated: if deprecated { "1" } else { "0" }.into(),
            owner: String::new(),
            owning_team: String::new(),
            preset_id: 1,
            id: ProjectId(id),
        }
    }

    #[test]
    fn test_new_has_only_root() {
        let tree = BranchTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.root().label, ROOT_LABEL);
        assert_eq!(tree.depth(), 0);
        assert!(tree.leaves().is_empty());
    }

    #[test]
    fn test_attach_and_navigate() {
        let mut tree = BranchTree::new();
        assert!(tree.attach(NodeKey::Root, &project(1, false)));
        assert!(tree.attach(ProjectId(1).into(), &project(2, false)));
        assert!(tree.attach(ProjectId(2).into(), &project(3, true)));

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.level_of(ProjectId(3)), Some(3));
        assert_eq!(tree.parent(ProjectId(2)), Some(NodeKey::Project(ProjectId(1))));
        assert_eq!(tree.leaves(), vec![ProjectId(3)]);
        assert!(tree.node(ProjectId(3)).unwrap().deprecated);
    }

    #[test]
    fn test_attach_rejects_duplicates_and_missing_parent() {
        let mut tree = BranchTree::new();
        assert!(tree.attach(NodeKey::Root, &project(1, false)));
        assert!(!tree.attach(NodeKey::Root, &project(1, false)));
        assert!(!tree.attach(ProjectId(99).into(), &project(2, false)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_leaf_only() {
        let mut tree = BranchTree::new();
        tree.attach(NodeKey::Root, &project(1, false));
        tree.attach(ProjectId(1).into(), &project(2, false));

        assert!(tree.remove_leaf(ProjectId(1)).is_none());
        assert!(tree.remove_leaf(ProjectId(2)).is_some());
        assert!(tree.children(ProjectId(1)).is_empty());
        assert!(tree.remove_leaf(ProjectId(1)).is_some());
        assert!(tree.is_empty());
        assert!(tree.root().children.is_empty());
    }

    #[test]
    fn test_pre_order_follows_insertion() {
        let mut tree = BranchTree::new();
        tree.attach(NodeKey::Root, &project(5, false));
        tree.attach(ProjectId(5).into(), &project(7, false));
        tree.attach(ProjectId(5).into(), &project(6, false));
        tree.attach(NodeKey::Root, &project(1, false));

        assert_eq!(
            tree.pre_order(),
            vec![ProjectId(5), ProjectId(7), ProjectId(6), ProjectId(1)]
        );
        assert_eq!(tree.leaves(), vec![ProjectId(7), ProjectId(6), ProjectId(1)]);
    }
}
