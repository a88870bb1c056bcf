//! Auth endpoints: session establishment and placeholder users.

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::{AuthToken, CreateTempUserRequest, SignInRequest, SignUpRequest, User};

impl ApiClient {
    /// POST auth/signin - Exchange credentials for a session token.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<AuthToken, ClientError> {
        self.post_json("auth/signin", request).await
    }

    /// POST auth/signup - Create a full account and receive its session token.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthToken, ClientError> {
        self.post_json("auth/signup", request).await
    }

    /// POST auth/signup/temp - Create a placeholder user for a family member
    /// who is not an account holder yet. Returns the new user record.
    pub async fn create_temp_user(
        &self,
        request: &CreateTempUserRequest,
    ) -> Result<User, ClientError> {
        self.post_json("auth/signup/temp", request).await
    }
}
