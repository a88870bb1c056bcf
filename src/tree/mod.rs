//! Tree composition: from the flat store to a nested renderable structure.

use std::collections::HashSet;

use crate::auth::AccessSet;
use crate::models::{Node, Person};
use crate::store::NodeStore;

/// One renderable family unit: a node, its symmetric spouse beside it, and
/// its children below.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub node: Node,
    pub spouse: Option<Node>,
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// Number of nodes composed under (and including) this one, spouses not
    /// counted.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RenderNode::count).sum::<usize>()
    }
}

/// Compose the renderable tree rooted at the tree's designated root.
///
/// Returns `None` when no root id is set or it does not resolve to a stored
/// node — the "no root" outcome that sends the caller into root creation,
/// distinct from a root without children. Children keep source order. A
/// visited set bounds the recursion, so composition terminates even when the
/// parent data is malformed and cyclic.
pub fn compose(store: &NodeStore, root_id: Option<&str>) -> Option<RenderNode> {
    let root = store.get(root_id?)?;
    let mut visited = HashSet::new();
    Some(compose_node(store, root, &mut visited))
}

fn compose_node(store: &NodeStore, node: &Node, visited: &mut HashSet<String>) -> RenderNode {
    visited.insert(node.id.clone());

    let mut children = Vec::new();
    for child in store.children_of(&node.id) {
        if visited.contains(&child.id) {
            continue;
        }
        children.push(compose_node(store, child, visited));
    }

    RenderNode {
        node: node.clone(),
        spouse: store.spouse_of(node).cloned(),
        children,
    }
}

/// Render the composed tree as indented text lines, one family unit per
/// line. Editable nodes are marked with `*`, tombstoned ones render as
/// their placeholder name.
pub fn outline(root: &RenderNode, access: &AccessSet) -> Vec<String> {
    let mut lines = Vec::new();
    outline_node(root, access, 0, &mut lines);
    lines
}

fn outline_node(unit: &RenderNode, access: &AccessSet, depth: usize, lines: &mut Vec<String>) {
    let indent = "    ".repeat(depth);
    let mut line = format!("{}{}", indent, label(&unit.node, access));
    if let Some(spouse) = &unit.spouse {
        line.push_str(" & ");
        line.push_str(&label(spouse, access));
    }
    lines.push(line);

    for child in &unit.children {
        outline_node(child, access, depth + 1, lines);
    }
}

fn label(node: &Node, access: &AccessSet) -> String {
    let mut text = match node.person() {
        Person::Live(user) => user.full_name.clone(),
        Person::Tombstoned => node.display_name().to_string(),
    };
    if access.allows(&node.id) {
        text.push_str(" *");
    }
    text
}
