//! Family tree endpoints.

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::{CreateTreeRequest, TreeList, TreeSnapshot, TreeSummary};

impl ApiClient {
    /// GET tree - Trees the viewer created and trees they are a member of.
    pub async fn list_trees(&self) -> Result<TreeList, ClientError> {
        self.get_json("tree").await
    }

    /// POST tree - Create a new family tree.
    pub async fn create_tree(&self, request: &CreateTreeRequest) -> Result<TreeSummary, ClientError> {
        self.post_json("tree", request).await
    }

    /// DELETE tree/{id} - Delete a whole family tree.
    pub async fn delete_tree(&self, tree_id: &str) -> Result<(), ClientError> {
        self.delete_unit(&format!("tree/{}", tree_id)).await
    }

    /// GET tree/{id} - Tree metadata plus the flat node list.
    pub async fn fetch_tree(&self, tree_id: &str) -> Result<TreeSnapshot, ClientError> {
        self.get_json(&format!("tree/{}", tree_id)).await
    }
}
