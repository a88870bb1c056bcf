//! Node model: a person's placement within one family tree.

use serde::{Deserialize, Serialize};

use super::User;

/// A node links a [`User`] to a position in a family tree. The parent link
/// defines ancestry; the spouse link pairs two nodes side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(rename = "_id")]
    pub id: String,
    pub family_tree: String,
    /// Absent once the person has been soft-deleted (tombstoned node).
    #[serde(default)]
    pub user: Option<User>,
    /// Absent on the root node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node: Option<String>,
    /// Id of the paired node; pairing is expected to be symmetric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<String>,
    /// Display flag only: true renders as male, false as female.
    pub gender: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,
}

/// A node's person slot, made exhaustive so render and delete logic cannot
/// forget the tombstone case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Person<'a> {
    /// The node belongs to a present user record.
    Live(&'a User),
    /// The user was detached by a soft delete; the node remains for the
    /// structural continuity of its descendants.
    Tombstoned,
}

impl Node {
    pub fn person(&self) -> Person<'_> {
        match &self.user {
            Some(user) => Person::Live(user),
            None => Person::Tombstoned,
        }
    }

    pub fn display_name(&self) -> &str {
        match self.person() {
            Person::Live(user) => &user.full_name,
            Person::Tombstoned => "(removed)",
        }
    }

    /// Id of the live user owning this node, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

/// Request body for creating a new node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    /// Present only when filling the tree's designated root slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    pub family_tree: String,
    pub user: String,
    pub parent_node: Option<String>,
    pub gender: bool,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub spouse: Option<String>,
    pub marriage_date: Option<String>,
}

/// Request body for a partial node update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeRequest {
    pub user: Option<String>,
    pub gender: bool,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub spouse: Option<String>,
    pub marriage_date: Option<String>,
}

/// Request body for pairing two nodes as spouses. The backend applies the
/// symmetric update to both nodes atomically.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSpouseRequest {
    pub first_one_id: String,
    pub second_one_id: String,
    pub marriage_date: Option<String>,
}
