use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::AppError;

/// Field names the mobile form sends. Other keys are accepted and passed through.
pub const FORM_FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "education",
    "skills",
    "experience",
    "achievements",
    "objective",
];

// ────────────────────────────────────────────────────────────────────────────
// FormSubmission
// ────────────────────────────────────────────────────────────────────────────

/// Raw form data as the client submitted it.
///
/// Values are not validated or retyped; the whole object is embedded in the
/// generation prompt verbatim, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSubmission {
    fields: Map<String, Value>,
}

impl FormSubmission {
    /// Parses a request body. Only presence is checked: the body must be a
    /// non-empty JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(AppError::Validation("No form data".to_string()));
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Form data is not valid JSON: {e}")))?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            Value::Null => Err(AppError::Validation("No form data".to_string())),
            other => Err(AppError::Validation(format!(
                "Form data must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Returns a field as text if it was sent as a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Number of recognised form fields that carry a non-blank value.
    pub fn known_fields_present(&self) -> usize {
        FORM_FIELDS
            .iter()
            .filter(|f| match self.fields.get(**f) {
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Null) | None => false,
                Some(_) => true,
            })
            .count()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pretty-printed JSON, as embedded in the prompt.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.fields)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StructuredResume
// ────────────────────────────────────────────────────────────────────────────

/// The canonical resume document produced by the model and consumed by the renderer.
///
/// Every field defaults when missing or `null`, so a sparse reply still yields
/// a complete value. A field of the wrong type fails the whole decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredResume {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bullets: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ────────────────────────────────────────────────────────────────────────────
// RenderedDocument
// ────────────────────────────────────────────────────────────────────────────

/// A PDF that has been fully written and persisted. Never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub id: Uuid,
    /// `<id>.pdf` — also the last path segment of `download_url`.
    pub file_name: String,
    pub file_path: PathBuf,
    pub download_url: String,
    pub page_count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
