//! Client configuration.
//!
//! Everything is caller-supplied at construction; the client never reads
//! files or environment variables.

use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("astore-client/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`Client`](crate::Client).
///
/// Only the base URL is required. A trailing slash on the base URL is
/// stripped before the first request.
#[derive(Debug, Clone)]
pub struct Config {
    /// Artifact store endpoint, e.g. `https://artifacts.example.com`.
    pub base_url: String,

    /// Bearer authentication token (optional).
    pub token: Option<String>,

    /// Per-request timeout (default: 60 seconds).
    pub timeout: Duration,

    /// Skip TLS certificate verification for this client instance only.
    /// For testing against self-signed endpoints.
    pub insecure_skip_verify: bool,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Config {
    /// Create a configuration for the given endpoint with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(60),
            insecure_skip_verify: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the bearer authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disable TLS certificate verification for this client instance.
    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    /// Override the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
