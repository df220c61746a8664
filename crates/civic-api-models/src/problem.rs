//! Error documents returned by the backend on failed requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a non-2xx response: `{"detail": ...}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// Human-readable detail, either a message or a validation list.
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

impl ErrorBody {
    /// Readable message extracted from the detail, if there is one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.detail.as_ref().and_then(ErrorDetail::message)
    }
}

/// Shapes the `detail` field takes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Plain message, e.g. a forwarded database trigger error.
    Message(String),
    /// Request validation failures, one per offending field.
    Validation(Vec<ValidationIssue>),
    /// Anything else, kept as raw JSON.
    Other(Value),
}

impl ErrorDetail {
    /// Render the detail as a single line of text.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let text = match self {
            Self::Message(message) => message.trim().to_string(),
            Self::Validation(issues) => issues
                .iter()
                .map(ValidationIssue::describe)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
            Self::Other(Value::Null) => String::new(),
            Self::Other(value) => value.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Single request-validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    /// Path to the field, e.g. `["body", "Department_ID"]`.
    #[serde(default)]
    pub loc: Vec<Value>,
    /// Failure description.
    #[serde(default)]
    pub msg: String,
}

impl ValidationIssue {
    fn describe(&self) -> String {
        let field = self.loc.last().and_then(|segment| match segment {
            Value::String(name) => Some(name.clone()),
            Value::Number(index) => Some(index.to_string()),
            _ => None,
        });
        match field {
            Some(field) if !self.msg.is_empty() => format!("{field}: {}", self.msg),
            _ => self.msg.clone(),
        }
    }
}
