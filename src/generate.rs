//! One form-generation cycle: configuration check, one completion call, classification.
//!
//! `generate_form` never fails; every path ends in a `FormOutcome`, and the HTTP layer
//! maps each variant to a fixed status code and payload via `IntoResponse`.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::{json, Value};

use crate::completion::CompletionClient;
use crate::config::ProviderConfig;
use crate::extract::{extract_content, FormContent};
use crate::prompt::build_completion_request;

pub const MISSING_CONFIG_ERROR: &str = "Missing required environment variables. Please set OPENAI_API_KEY, OPENAI_MODEL, and OPENAI_BASE_URL.";
pub const UPSTREAM_ERROR: &str = "Upstream request failed";
pub const UNEXPECTED_SHAPE_ERROR: &str = "Unexpected response format from model provider";
pub const EXCEPTION_ERROR: &str = "Exception while calling the model provider";

/// Terminal result of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Content extracted (decoded JSON or raw text).
    Success(FormContent),
    /// One or more provider settings are empty; no outbound call was made.
    ConfigMissing,
    /// Provider answered with a non-2xx status.
    Upstream { status: u16, body: Value },
    /// Provider answered 2xx but `choices[0].message.content` was not there.
    UnexpectedShape { received: Value },
    /// The call could not be completed (network, serialization, unusable input or
    /// success body).
    Internal { message: String },
}

impl FormOutcome {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FormOutcome::Success(_) => StatusCode::OK,
            FormOutcome::Upstream { .. } => StatusCode::BAD_GATEWAY,
            FormOutcome::ConfigMissing
            | FormOutcome::UnexpectedShape { .. }
            | FormOutcome::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FormOutcome::Success(_) => "success",
            FormOutcome::ConfigMissing => "config_missing",
            FormOutcome::Upstream { .. } => "upstream_error",
            FormOutcome::UnexpectedShape { .. } => "unexpected_shape",
            FormOutcome::Internal { .. } => "internal_error",
        }
    }

    /// JSON payload relayed to the caller.
    pub fn into_body(self) -> Value {
        match self {
            FormOutcome::Success(content) => json!({ "message": content.into_value() }),
            FormOutcome::ConfigMissing => json!({ "error": MISSING_CONFIG_ERROR }),
            FormOutcome::Upstream { status, body } => json!({
                "error": UPSTREAM_ERROR,
                "status": status,
                "body": body,
            }),
            FormOutcome::UnexpectedShape { received } => json!({
                "error": UNEXPECTED_SHAPE_ERROR,
                "example_expected": {
                    "choices": [
                        { "message": { "content": "..." } }
                    ]
                },
                "received": received,
            }),
            FormOutcome::Internal { message } => json!({
                "error": EXCEPTION_ERROR,
                "message": message,
            }),
        }
    }
}

impl IntoResponse for FormOutcome {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.into_body())).into_response()
    }
}

/// Run one form-generation cycle against the configured provider.
///
/// Issues at most one call to `client`, and none when `config` is incomplete.
pub async fn generate_form(
    config: &ProviderConfig,
    client: &dyn CompletionClient,
    message: &str,
) -> FormOutcome {
    if !config.is_complete() {
        tracing::warn!(missing = ?config.missing(), "provider configuration incomplete");
        return FormOutcome::ConfigMissing;
    }

    let request = build_completion_request(&config.model, message);

    let reply = match client.complete(config, &request).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "completion call failed");
            return FormOutcome::Internal {
                message: e.to_string(),
            };
        }
    };

    if !reply.is_success() {
        tracing::warn!(status = reply.status, "model provider returned an error status");
        return FormOutcome::Upstream {
            status: reply.status,
            body: reply.body_value(),
        };
    }

    let body = match envelope(&reply.body) {
        Ok(v) => v,
        Err(message) => {
            tracing::error!(error = %message, "unusable success body from model provider");
            return FormOutcome::Internal { message };
        }
    };

    match extract_content(&body) {
        FormContent::Absent => {
            tracing::warn!("model provider response has no choices[0].message.content");
            FormOutcome::UnexpectedShape { received: body }
        }
        content => FormOutcome::Success(content),
    }
}

/// Outcome for a caller `message` that cannot be used as a prompt (JSON `null`, an array
/// or an object). The configuration check still comes first.
pub fn reject_message(config: &ProviderConfig, reason: String) -> FormOutcome {
    if !config.is_complete() {
        tracing::warn!(missing = ?config.missing(), "provider configuration incomplete");
        return FormOutcome::ConfigMissing;
    }
    tracing::error!(error = %reason, "unusable message in request");
    FormOutcome::Internal { message: reason }
}

/// Parse a success body into the JSON container that content extraction walks.
///
/// Objects and arrays are accepted (an array simply has no `choices`); anything else
/// cannot hold a completion envelope.
fn envelope(body: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| format!("model provider returned a success body that is not JSON: {e}"))?;
    let kind = match &value {
        Value::Object(_) | Value::Array(_) => return Ok(value),
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
    };
    Err(format!(
        "model provider returned a JSON {kind} where a response object was expected"
    ))
}
