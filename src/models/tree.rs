//! Family tree models matching the backend tree endpoints.

use serde::{Deserialize, Serialize};

use super::Node;

/// Metadata of a single family tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User id of the tree creator; grants full access.
    pub creator: String,
    /// User ids with admin rights; each grants full access.
    #[serde(default)]
    pub admin: Vec<String>,
    /// Designated root node id. May point at a node that does not exist yet,
    /// in which case the view offers root creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_node: Option<String>,
}

/// Payload of `GET tree/{treeId}`: tree metadata plus the flat node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSnapshot {
    pub tree_info: TreeInfo,
    pub tree_nodes: Vec<Node>,
}

/// One entry of the tree listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload of `GET tree`: trees the viewer created and trees they appear in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeList {
    #[serde(default)]
    pub created_trees: Vec<TreeSummary>,
    #[serde(default)]
    pub member_trees: Vec<TreeSummary>,
}

/// Request body for creating a new family tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTreeRequest {
    pub name: String,
    pub description: String,
}
