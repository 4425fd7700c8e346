//! Outbound Chat Completions call.
//!
//! `CompletionClient` is the seam between the orchestration in `crate::generate` and the
//! network. `HttpCompletionClient` is the production implementation over `reqwest`; tests
//! substitute in-process fakes.

use async_trait::async_trait;
use http::header;
use thiserror::Error;

use crate::config::ProviderConfig;
use crate::models::chat::ChatCompletionRequest;

/// Failures that prevent an HTTP response from being obtained at all.
///
/// A response with a non-2xx status is NOT an error here; it is returned as an
/// `UpstreamReply` and classified by the caller.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to serialize completion request: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Raw upstream HTTP response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body parsed as JSON, or `None` when it is not JSON (or is JSON `null`).
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .filter(|v| !v.is_null())
    }

    /// Body as a JSON value for diagnostics: parsed when possible, else the raw text.
    pub fn body_value(&self) -> serde_json::Value {
        self.json()
            .unwrap_or_else(|| serde_json::Value::String(self.body.clone()))
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue exactly one completion request. Implementations must not retry.
    async fn complete(
        &self,
        config: &ProviderConfig,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamReply, CompletionError>;
}

/// `reqwest`-backed client posting to `{base_url}/v1/chat/completions`.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Client built from the environment (timeouts, proxies); see `util::build_http_client_from_env`.
    pub fn from_env() -> Self {
        Self::new(crate::util::build_http_client_from_env())
    }
}

impl Default for HttpCompletionClient {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        config: &ProviderConfig,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamReply, CompletionError> {
        let url = config.completions_url();
        let payload = serde_json::to_vec(request)?;

        tracing::debug!(url = %url, model = %request.model, "sending completion request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&config.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;

        tracing::debug!(status, body_len = body.len(), "completion response received");

        Ok(UpstreamReply { status, body })
    }
}
