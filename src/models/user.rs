//! User model and auth request types matching the backend contract.

use serde::{Deserialize, Serialize};

/// An account holder (or placeholder created for an invented family member).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for signing in with a username or email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub identifier: String,
    pub password: String,
}

/// Request body for creating a full account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
}

/// Request body for creating a placeholder user for a family member who has
/// no account yet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTempUserRequest {
    pub full_name: String,
    pub bio: String,
    pub home_town: String,
}

/// Token payload returned by the sign-in and sign-up endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthToken {
    pub token: String,
}
