use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Input widget kinds the form generator is allowed to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Date,
    Select,
    Password,
    Checkbox,
    Radio,
    Number,
    Textarea,
}

impl FieldType {
    pub const ALL: [FieldType; 9] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Date,
        FieldType::Select,
        FieldType::Password,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Number,
        FieldType::Textarea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Password => "password",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
        }
    }
}

/// One field of a generated form.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    pub name: String,
    #[serde(default)]
    pub required: bool,
    /// Only meaningful for `select` and `radio`.
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// Form schema the model is instructed to produce.
///
/// The service never validates the model's answer against this type; it is a typed view
/// for library consumers (see `FormContent::as_form_schema`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub form_title: String,
    /// Hex color, e.g. "#1E90FF".
    pub theme_color: String,
    pub font: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}
