//! Error handling module for the FamilyTree client.
//!
//! Provides a central error type separating failures caught locally (before any
//! network call) from failures reported by the backend.

use serde::Deserialize;

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_PERMITTED: &str = "NOT_PERMITTED";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const REMOTE_ERROR: &str = "REMOTE_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const REQUEST_IN_FLIGHT: &str = "REQUEST_IN_FLIGHT";
}

/// Client error type.
#[derive(Debug)]
pub enum ClientError {
    /// Malformed input rejected before any request was sent
    Validation(String),
    /// The local access set does not cover the targeted node
    NotPermitted(String),
    /// The backend rejected the session token
    Unauthorized(String),
    /// The backend reported the resource missing
    NotFound(String),
    /// Any other backend failure; the message is surfaced verbatim
    Remote { status: u16, message: String },
    /// Network-level failure before a response arrived
    Transport(String),
    /// Response body did not match the expected shape
    Decode(String),
    /// A mutation for this view is already in flight
    Busy(String),
}

impl ClientError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::NotPermitted(_) => codes::NOT_PERMITTED,
            ClientError::Unauthorized(_) => codes::UNAUTHORIZED,
            ClientError::NotFound(_) => codes::NOT_FOUND,
            ClientError::Remote { .. } => codes::REMOTE_ERROR,
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Busy(_) => codes::REQUEST_IN_FLIGHT,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::NotPermitted(msg) => msg.clone(),
            ClientError::Unauthorized(msg) => msg.clone(),
            ClientError::NotFound(msg) => msg.clone(),
            ClientError::Remote { message, .. } => message.clone(),
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::Busy(msg) => msg.clone(),
        }
    }

}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::error!("Decode error: {:?}", err);
            ClientError::Decode(format!("Decode error: {}", err))
        } else {
            tracing::error!("Transport error: {:?}", err);
            ClientError::Transport(format!("Transport error: {}", err))
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

/// Error body returned by the backend on failure.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
