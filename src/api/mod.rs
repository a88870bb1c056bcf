//! HTTP API module.
//!
//! All backend communication goes through [`ApiClient`]: one `reqwest` client
//! carrying the base URL and the session's bearer token, with typed endpoint
//! wrappers grouped per resource.

mod auth;
mod node;
mod tree;
mod user;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ClientError, ErrorBody};

/// Success response envelope used by every backend endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Typed HTTP client for the FamilyTree backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            token: config.access_token.clone(),
        })
    }

    /// Install the bearer token obtained from sign-in or sign-up.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and decode the envelope's `data` field.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(remote_error(status, response.text().await.ok()));
        }

        let envelope: Envelope<T> = response.json().await?;
        if let Some(message) = &envelope.message {
            tracing::debug!("Backend: {}", message);
        }
        Ok(envelope.data)
    }

    /// Send a request where only success or failure matters.
    async fn send_unit(&self, builder: reqwest::RequestBuilder) -> Result<(), ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(remote_error(status, response.text().await.ok()));
        }
        Ok(())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::DELETE, path)).await
    }
}

/// Map a non-success response to a [`ClientError`], surfacing the backend's
/// message verbatim when the body carries one.
fn remote_error(status: StatusCode, body: Option<String>) -> ClientError {
    let message = body
        .as_deref()
        .and_then(|b| serde_json::from_str::<ErrorBody>(b).ok())
        .and_then(|b| b.message)
        .or(body)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Remote {
            status: status.as_u16(),
            message,
        },
    }
}
