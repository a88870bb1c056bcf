//! In-memory store of a fetched node list.
//!
//! Normalizes the flat node sequence of one tree into lookup indices. Built
//! wholesale from every fetch; never mutated in place.

use std::collections::HashMap;

use crate::models::Node;

/// Lookup indices over one tree's nodes: by id and by parent, with spouse
/// resolution reusing the id index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeStore {
    by_id: HashMap<String, Node>,
    /// Node ids in first-occurrence source order.
    order: Vec<String>,
    /// Child ids per parent id, in source order.
    children: HashMap<String, Vec<String>>,
}

impl NodeStore {
    /// Build the indices from the fetched sequence. Duplicate ids keep their
    /// first position but the last record wins; dangling parent or spouse
    /// references stay in place and simply resolve to nothing.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut by_id: HashMap<String, Node> = HashMap::with_capacity(nodes.len());
        let mut order = Vec::with_capacity(nodes.len());
        for node in nodes {
            if !by_id.contains_key(&node.id) {
                order.push(node.id.clone());
            }
            by_id.insert(node.id.clone(), node);
        }

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for id in &order {
            if let Some(parent) = &by_id[id].parent_node {
                children.entry(parent.clone()).or_default().push(id.clone());
            }
        }

        Self {
            by_id,
            order,
            children,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Children of `parent_id` in source order; empty when it has none or is
    /// unknown.
    pub fn children_of(&self, parent_id: &str) -> Vec<&Node> {
        self.children
            .get(parent_id)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id)).collect())
            .unwrap_or_default()
    }

    /// The spouse of `node`, only when the pairing holds in both directions.
    /// Dangling or one-sided references resolve to `None`.
    pub fn spouse_of(&self, node: &Node) -> Option<&Node> {
        let spouse = self.by_id.get(node.spouse.as_deref()?)?;
        if spouse.spouse.as_deref() == Some(node.id.as_str()) {
            Some(spouse)
        } else {
            None
        }
    }

    /// The node owned by the given user, if that user appears in this tree.
    /// Tombstoned nodes have no owner and never match.
    pub fn node_of_user(&self, user_id: &str) -> Option<&Node> {
        self.nodes().find(|n| n.user_id() == Some(user_id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
