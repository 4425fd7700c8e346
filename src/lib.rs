#![forbid(unsafe_code)]
#![doc = r#"
Formsmith

Turn a natural-language description of a form into a JSON form schema by asking an
OpenAI-compatible Chat Completions provider, then relay the schema back to the caller.

Crate highlights
- Library: `generate_form(&ProviderConfig, &dyn CompletionClient, message)` returns a
  classified `FormOutcome` that maps onto a fixed HTTP status and JSON payload.
- HTTP server (in `server`): `/api/form` (GET or POST) and `/status`.
- Models: the outbound Chat Completions request and the form schema the model is asked for.

Modules
- `config`: Provider configuration read once at startup.
- `models`: Data structures for Chat Completions and form schemas.
- `prompt`: The fixed form-generator system prompt and request builder.
- `completion`: The outbound completion client (trait + reqwest implementation).
- `extract`: Locating and decoding the model's answer inside the provider envelope.
- `generate`: One request/response cycle and its classification.
- `server`: Axum router/handlers (the binary uses this).
- `util`: Shared helpers (tracing, env, HTTP client, CORS).
"#]

pub mod completion;
pub mod config;
pub mod extract;
pub mod generate;
pub mod models;
pub mod prompt;
pub mod server;
pub mod util;

pub use crate::completion::{CompletionClient, CompletionError, HttpCompletionClient, UpstreamReply};
pub use crate::config::ProviderConfig;
pub use crate::extract::{extract_content, FormContent};
pub use crate::generate::{generate_form, FormOutcome};

// Re-export model namespaces for convenience (downstream users can do `use formsmith::form`).
pub use crate::models::{chat, form};
