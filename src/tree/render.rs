//! Text and JSON rendering of a branch tree.

use super::forest::{BranchTree, NodeKey};
use crate::error::Result;
use crate::types::ProjectId;
use serde::Serialize;

/// Connector glyphs used to draw the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    /// `|-- ` and `+-- `.
    Ascii,
    /// `├── ` and `└── `.
    #[default]
    AsciiEx,
    /// `├── ` and `╰── `.
    AsciiExr,
}

impl LineStyle {
    /// (vertical, branch, last branch)
    fn glyphs(self) -> (&'static str, &'static str, &'static str) {
        match self {
            LineStyle::Ascii => ("|", "|-- ", "+-- "),
            LineStyle::AsciiEx => ("│", "├── ", "└── "),
            LineStyle::AsciiExr => ("│", "├── ", "╰── "),
        }
    }
}

/// How siblings are ordered in the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SiblingOrder {
    /// Lexicographic by label.
    #[default]
    Label,
    /// The order edges placed them.
    Insertion,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub line_style: LineStyle,
    pub sibling_order: SiblingOrder,
}

/// Render the tree, one `\n`-terminated line per node, root first.
pub fn render(tree: &BranchTree, options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&tree.root().label);
    out.push('\n');

    let mut trail = Vec::new();
    for (child, is_last) in with_last(ordered_children(tree, NodeKey::Root, options.sibling_order)) {
        render_node(tree, child, is_last, &mut trail, options, &mut out);
    }
    out
}

fn render_node(
    tree: &BranchTree,
    id: ProjectId,
    is_last: bool,
    trail: &mut Vec<bool>,
    options: &RenderOptions,
    out: &mut String,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let (vline, branch, last_branch) = options.line_style.glyphs();

    for ancestor_was_last in trail.iter() {
        if *ancestor_was_last {
            out.push_str("    ");
        } else {
            out.push_str(vline);
            out.push_str("   ");
        }
    }
    out.push_str(if is_last { last_branch } else { branch });
    out.push_str(&node.label);
    out.push('\n');

    trail.push(is_last);
    for (child, child_is_last) in with_last(ordered_children(tree, id.into(), options.sibling_order)) {
        render_node(tree, child, child_is_last, trail, options, out);
    }
    trail.pop();
}

fn ordered_children(tree: &BranchTree, key: NodeKey, order: SiblingOrder) -> Vec<ProjectId> {
    let mut children = tree.children(key).to_vec();
    if order == SiblingOrder::Label {
        children.sort_by(|a, b| {
            let la = tree.node(*a).map(|n| n.label.as_str()).unwrap_or_default();
            let lb = tree.node(*b).map(|n| n.label.as_str()).unwrap_or_default();
            la.cmp(lb).then(a.cmp(b))
        });
    }
    children
}

fn with_last(items: Vec<ProjectId>) -> impl Iterator<Item = (ProjectId, bool)> {
    let count = items.len();
    items
        .into_iter()
        .enumerate()
        .map(move |(i, id)| (id, i + 1 == count))
}

/// Nested JSON shape of a node.
#[derive(Debug, Serialize)]
struct JsonNode<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<ProjectId>,
    label: &'a str,
    deprecated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'a>>,
}

fn json_node(tree: &BranchTree, key: NodeKey, order: SiblingOrder) -> Option<JsonNode<'_>> {
    let node = tree.node(key)?;
    let id = match key {
        NodeKey::Root => None,
        NodeKey::Project(id) => Some(id),
    };
    let children = ordered_children(tree, key, order)
        .into_iter()
        .filter_map(|child| json_node(tree, child.into(), order))
        .collect();

    Some(JsonNode {
        id,
        label: &node.label,
        deprecated: node.deprecated,
        children,
    })
}

/// Pretty-printed nested JSON export of the tree.
pub fn to_json(tree: &BranchTree, order: SiblingOrder) -> Result<String> {
    let root = json_node(tree, NodeKey::Root, order);
    Ok(serde_json::to_string_pretty(&root)?)
}
