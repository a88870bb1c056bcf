//! Configuration module for the FamilyTree client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API, including the trailing slash
    pub api_url: String,
    /// Bearer token of an existing session, if any
    pub access_token: Option<String>,
    /// Username or email to sign in with when no token is configured
    pub identifier: Option<String>,
    /// Password matching `identifier`
    pub password: Option<String>,
    /// Timeout applied to every request
    pub request_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut api_url =
            env::var("FAMILYTREE_API_URL").unwrap_or_else(|_| "http://localhost:3000/api/".to_string());
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        let access_token = env::var("FAMILYTREE_TOKEN").ok();
        let identifier = env::var("FAMILYTREE_IDENTIFIER").ok();
        let password = env::var("FAMILYTREE_PASSWORD").ok();

        let request_timeout = env::var("FAMILYTREE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let log_level = env::var("FAMILYTREE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_url,
            access_token,
            identifier,
            password,
            request_timeout,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("FAMILYTREE_API_URL");
        env::remove_var("FAMILYTREE_TOKEN");
        env::remove_var("FAMILYTREE_IDENTIFIER");
        env::remove_var("FAMILYTREE_PASSWORD");
        env::remove_var("FAMILYTREE_HTTP_TIMEOUT_SECS");
        env::remove_var("FAMILYTREE_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.api_url, "http://localhost:3000/api/");
        assert!(config.access_token.is_none());
        assert!(config.identifier.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_api_url_gains_trailing_slash() {
        env::set_var("FAMILYTREE_API_URL", "http://tree.example.com/api");
        let config = Config::from_env();
        env::remove_var("FAMILYTREE_API_URL");

        assert_eq!(config.api_url, "http://tree.example.com/api/");
    }
}
