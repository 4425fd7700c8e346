//! Data models for the outbound Chat Completions call and the generated form schema.
//!
//! This module groups two submodules:
//! - `chat`: The subset of the OpenAI Chat Completions request model this service sends.
//! - `form`: The form schema the model is instructed to produce.
//!
//! The fixed request is assembled in `crate::prompt`; the model's answer is located in
//! `crate::extract`.

pub mod chat;
pub mod form;

// Optional convenience re-exports for downstream users.
pub use chat::{ChatCompletionRequest, ChatMessage, ResponseFormat, Role};
pub use form::{FieldType, FormField, FormSchema};
