use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::completion::{CompletionClient, HttpCompletionClient};
use crate::config::ProviderConfig;
use crate::generate::{generate_form, reject_message};
use crate::prompt::resolve_message;
use crate::util::cors_layer_from_env;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProviderConfig>,
    pub client: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(config: ProviderConfig, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Provider config and HTTP client both read from the process environment.
    pub fn from_env() -> Self {
        Self::new(
            ProviderConfig::from_env(),
            Arc::new(HttpCompletionClient::from_env()),
        )
    }
}

/// Caller input for `/api/form`; accepted from the query string and the JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct FormRequest {
    /// Natural-language description of the wanted form. `Some(Value::Null)` when the
    /// key was sent as `null`, `None` when it was not sent at all.
    #[serde(default, deserialize_with = "present")]
    pub message: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl FormRequest {
    /// `None` when no message was sent. Numbers and booleans are stringified; `null`,
    /// arrays and objects are rejected.
    fn message_input(&self) -> Option<Result<String, String>> {
        let input = match self.message.as_ref()? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Err("message must be a string, got null".to_string()),
            Value::Array(_) => Err("message must be a string, got an array".to_string()),
            Value::Object(_) => Err("message must be a string, got an object".to_string()),
        };
        Some(input)
    }
}

/// Build the Axum router with `/api/form` and `/status`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/api/form", get(generate_from_query).post(generate_from_body))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer_from_env())
}

/// Service status endpoint: version and whether the provider settings are complete.
async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let routes = vec!["/status", "/api/form"];
    Json(serde_json::json!({
        "name": "formsmith",
        "version": env!("CARGO_PKG_VERSION"),
        "configured": state.config.is_complete(),
        "routes": routes
    }))
}

/// `GET /api/form?message=...`
async fn generate_from_query(
    State(state): State<AppState>,
    Query(q): Query<FormRequest>,
) -> Response {
    handle(&state, q.message_input()).await
}

/// `POST /api/form` with `{ "message": "..." }`. A `message` key in the body wins over the
/// query string, even when its value is unusable; an empty or unparseable body falls back
/// to the query.
async fn generate_from_body(
    State(state): State<AppState>,
    Query(q): Query<FormRequest>,
    body: Option<Json<FormRequest>>,
) -> Response {
    let message = body
        .and_then(|Json(b)| b.message_input())
        .or_else(|| q.message_input());
    handle(&state, message).await
}

async fn handle(state: &AppState, input: Option<Result<String, String>>) -> Response {
    let span = tracing::info_span!("generate_form", request_id = %uuid::Uuid::new_v4());
    async move {
        let message = match input.transpose() {
            Ok(message) => resolve_message(message),
            Err(reason) => return reject_message(&state.config, reason).into_response(),
        };
        let outcome = generate_form(&state.config, state.client.as_ref(), &message).await;
        tracing::info!(
            message_len = message.len(),
            outcome = outcome.kind(),
            status = outcome.status_code().as_u16(),
            "form request handled"
        );
        outcome.into_response()
    }
    .instrument(span)
    .await
}
