//! Shared HTTP transport.
//!
//! One [`Transport`] per client owns the connection pool, the normalized
//! base URL, the bearer token, and the per-request timeout. Operation
//! modules compose over it: they build a request, the transport executes it
//! and maps failures. TLS-verification skipping is scoped to this instance's
//! `reqwest::Client`, never process-wide.

use std::sync::RwLock;

use bytes::Bytes;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::errors::{Error, Result};

#[derive(Debug)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl Transport {
    pub(crate) fn new(config: Config) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::Config("base_url is required".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(
                "base_url must use the http or https scheme".into(),
            ));
        }

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str());
        if config.insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            token: RwLock::new(config.token),
        })
    }

    /// Rotate the bearer token used for subsequent requests.
    pub(crate) fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().expect("token lock poisoned");
        *guard = Some(token.into());
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a request for `path` with the default headers applied.
    ///
    /// Headers set on the returned builder take precedence over the
    /// defaults on key collision.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, %url, "sending request");
        let mut req = self.http.request(method, url);
        let token = self.token.read().expect("token lock poisoned");
        if let Some(token) = token.as_deref() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Execute a request, mapping status codes >= 400 to typed errors.
    ///
    /// Network-level failures (connect, timeout, TLS) surface as
    /// [`Error::Transport`]; completed responses below 400 are returned.
    pub(crate) async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        if status < 400 {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::from_response(status, &body))
    }

    /// Execute a request and decode the JSON response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = self.send(req).await?;
        let body: Bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
