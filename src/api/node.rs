//! Node endpoints: creation, partial update, spouse pairing and deletion.

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::{CreateNodeRequest, Node, PairSpouseRequest, UpdateNodeRequest};

impl ApiClient {
    /// GET node/{id} - A single node with its user populated.
    pub async fn get_node(&self, node_id: &str) -> Result<Node, ClientError> {
        self.get_json(&format!("node/{}", node_id)).await
    }

    /// POST node - Create a node; returns it with the assigned id.
    pub async fn create_node(&self, request: &CreateNodeRequest) -> Result<Node, ClientError> {
        self.post_json("node", request).await
    }

    /// PUT node/{id} - Partial update of editable node fields.
    pub async fn update_node(
        &self,
        node_id: &str,
        request: &UpdateNodeRequest,
    ) -> Result<Node, ClientError> {
        self.put_json(&format!("node/{}", node_id), request).await
    }

    /// POST node/spouse - Pair two nodes; the backend updates both sides.
    pub async fn pair_spouse(&self, request: &PairSpouseRequest) -> Result<(), ClientError> {
        self.post_unit("node/spouse", request).await
    }

    /// DELETE node/{id} - Soft delete: detaches the user, keeps the node.
    pub async fn delete_node(&self, node_id: &str) -> Result<(), ClientError> {
        self.delete_unit(&format!("node/{}", node_id)).await
    }

    /// DELETE node/force/{id} - Hard delete of an already tombstoned node.
    pub async fn force_delete_node(&self, node_id: &str) -> Result<(), ClientError> {
        self.delete_unit(&format!("node/force/{}", node_id)).await
    }
}
