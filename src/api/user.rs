//! User endpoints: viewer identity and fuzzy user search.

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::User;

impl ApiClient {
    /// GET user/me - Identity of the signed-in viewer.
    pub async fn me(&self) -> Result<User, ClientError> {
        self.get_json("user/me").await
    }

    /// GET user?query= - Fuzzy search over names and usernames. An empty
    /// result list is a normal outcome, not an error.
    pub async fn search_users(&self, query: &str) -> Result<Vec<User>, ClientError> {
        self.get_query("user", &[("query", query)]).await
    }
}
