use serde_json::Value;

use crate::models::form::FormSchema;

/// The model's answer after content extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum FormContent {
    /// Content decoded from JSON text, or content that already arrived as structured JSON.
    Structured(Value),
    /// Content that was a string but not JSON text; passed through unchanged.
    Text(String),
    /// `choices[0].message.content` missing, `null`, or the JSON text `null`.
    Absent,
}

impl FormContent {
    pub fn is_absent(&self) -> bool {
        matches!(self, FormContent::Absent)
    }

    /// JSON value relayed to the caller under `message`.
    pub fn into_value(self) -> Value {
        match self {
            FormContent::Structured(v) => v,
            FormContent::Text(s) => Value::String(s),
            FormContent::Absent => Value::Null,
        }
    }

    /// Best-effort typed view of structured content. `None` when the model's answer does
    /// not follow the form schema shape.
    pub fn as_form_schema(&self) -> Option<FormSchema> {
        match self {
            FormContent::Structured(v) => serde_json::from_value(v.clone()).ok(),
            _ => None,
        }
    }
}

/// Locate `choices[0].message.content` in a provider response body and decode it.
pub fn extract_content(body: &Value) -> FormContent {
    let content = body
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"));

    match content {
        None | Some(Value::Null) => FormContent::Absent,
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Null) => FormContent::Absent,
            Ok(decoded) => FormContent::Structured(decoded),
            Err(_) => FormContent::Text(s.clone()),
        },
        Some(other) => FormContent::Structured(other.clone()),
    }
}
