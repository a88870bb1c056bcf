//! Session context and client-side authorization.
//!
//! The access set decides which controls the view offers. It is advisory
//! only; every mutation is re-validated by the backend, which remains the
//! authority.

use std::collections::HashSet;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{TreeInfo, User};
use crate::store::NodeStore;

/// The signed-in viewer, passed explicitly to every component that needs
/// identity rather than read from ambient state.
#[derive(Debug, Clone)]
pub struct Session {
    viewer: User,
}

impl Session {
    /// Ask the backend who the configured token belongs to.
    pub async fn establish(api: &ApiClient) -> Result<Self, ClientError> {
        let viewer = api.me().await?;
        tracing::info!(viewer = %viewer.id, "Session established");
        Ok(Self { viewer })
    }

    pub fn from_user(viewer: User) -> Self {
        Self { viewer }
    }

    pub fn viewer(&self) -> &User {
        &self.viewer
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer.id
    }
}

/// The set of node ids the viewer may mutate in one tree. Recomputed
/// wholesale whenever the node list or the viewer changes.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessSet {
    full_access: bool,
    nodes: HashSet<String>,
}

impl AccessSet {
    /// Compute the viewer's access over the given store.
    ///
    /// The tree creator and every admin get the whole tree without any
    /// traversal. Anyone else gets the subtree grant rooted at their own
    /// node: the node itself, its symmetric spouse (a terminal grant, no
    /// recursion into the spouse's branches), and every descendant along
    /// `parent_node` links together with each descendant's spouse. A viewer
    /// with no node in the tree gets nothing.
    pub fn resolve(store: &NodeStore, tree: &TreeInfo, viewer_id: &str) -> Self {
        if tree.creator == viewer_id || tree.admin.iter().any(|id| id == viewer_id) {
            return Self {
                full_access: true,
                nodes: store.ids().map(str::to_string).collect(),
            };
        }

        let mut nodes = HashSet::new();
        if let Some(own) = store.node_of_user(viewer_id) {
            let own_id = own.id.clone();
            let mut visited = HashSet::new();
            grant_subtree(store, &own_id, &mut nodes, &mut visited);
        }

        Self {
            full_access: false,
            nodes,
        }
    }

    /// Whether the viewer holds the creator/admin grant over the whole tree.
    pub fn full_access(&self) -> bool {
        self.full_access
    }

    /// O(1) membership test.
    pub fn allows(&self, node_id: &str) -> bool {
        self.full_access || self.nodes.contains(node_id)
    }

    pub fn node_ids(&self) -> &HashSet<String> {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Depth-first subtree grant. The visited set bounds recursion so malformed
/// parent data cannot loop; dangling spouse references are skipped silently.
fn grant_subtree(
    store: &NodeStore,
    node_id: &str,
    granted: &mut HashSet<String>,
    visited: &mut HashSet<String>,
) {
    if !visited.insert(node_id.to_string()) {
        return;
    }
    let Some(node) = store.get(node_id) else {
        return;
    };

    granted.insert(node.id.clone());
    if let Some(spouse) = store.spouse_of(node) {
        granted.insert(spouse.id.clone());
    }
    for child in store.children_of(node_id) {
        grant_subtree(store, &child.id, granted, visited);
    }
}
