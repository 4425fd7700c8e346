//! Fixed prompt construction for the form generator.

use crate::models::chat::{ChatCompletionRequest, ChatMessage, ResponseFormat};

/// System instruction sent ahead of every user prompt.
pub const FORM_GENERATOR_PROMPT: &str = r##"You are a JSON form generator.
The user describes which fields they want and you must return only a valid JSON object with this structure:

{
  "formTitle": "Text",
  "themeColor": "#HEXCOLOR",
  "font": "Font name",
  "fields": [
    {
      "type": "text | email | date | select | password | checkbox | radio | number | textarea",
      "label": "Visible text in the form",
      "name": "internalFieldName",
      "required": true | false,
      "options": ["Option1", "Option2"] // only for select or radio
    }
  ]
}

Rules:
- Do not return explanations or any additional text, only the JSON.
- Always include "formTitle", "themeColor" and "font".
- `fields` must be an array with the fields requested by the user."##;

/// Sample prompt used when the caller does not send a `message`.
pub const DEFAULT_MESSAGE: &str =
    "I want a form to keep track of the guests at my restaurant's opening";

/// Resolve the user prompt: the caller's message, or `DEFAULT_MESSAGE` when none was sent.
pub fn resolve_message(message: Option<String>) -> String {
    match message {
        Some(m) => m,
        None => {
            tracing::debug!("no message supplied; using default sample prompt");
            DEFAULT_MESSAGE.to_string()
        }
    }
}

/// Build the outbound request: `json_object` response format, then exactly two messages
/// (system instruction, user prompt) in that order.
pub fn build_completion_request(model: &str, message: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        response_format: ResponseFormat::json_object(),
        messages: vec![
            ChatMessage::system(FORM_GENERATOR_PROMPT),
            ChatMessage::user(message),
        ],
    }
}
