//! Error types for document handling.

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors that can occur while turning raw JSON into a [`Document`].
///
/// Decoding a component model out of a document never fails; only the
/// textual edge (parsing JSON, checking the root shape) can.
///
/// [`Document`]: crate::document::Document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The input was not valid JSON.
    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input was valid JSON but its root was not an object.
    #[error("expected a JSON object at the document root, found {found}")]
    NotAnObject { found: &'static str },
}

impl DocumentError {
    /// Create a root-shape error for the given JSON value.
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        Self::NotAnObject {
            found: json_type_name(value),
        }
    }
}

/// Returns a short name for the JSON type of `value`.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
