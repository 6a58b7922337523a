//! The single error record produced by a failed validation.

use serde_json::Value;
use thiserror::Error;

use crate::path::JsonPath;

/// The first violation found while validating a value.
///
/// Validation stops at the first failure, so a failed call carries exactly
/// one `SchemaError`. Nested failures travel upward unchanged: the record
/// that reaches the caller is the one built where the violation was found.
///
/// - **path**: where the offending value lives (`arr[2]`)
/// - **message**: the human-readable diagnostic, also the `Display` output
/// - **code**: machine-readable category (`required`, `not_included`, ...)
/// - **value**: the offending value, absent for missing required values
/// - **expected**: short description of what would have been accepted
///
/// # Example
///
/// ```rust
/// use conform::{JsonPath, SchemaError};
/// use serde_json::json;
///
/// let error = SchemaError::new(JsonPath::root().push_field("age"), "the value of age must be a number")
///     .with_code("invalid_type")
///     .with_value(json!("old"))
///     .with_expected("number");
///
/// assert_eq!(error.to_string(), "the value of age must be a number");
/// assert_eq!(error.code, "invalid_type");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SchemaError {
    pub path: JsonPath,
    pub message: String,
    pub code: String,
    pub value: Option<Value>,
    pub expected: Option<String>,
}

impl SchemaError {
    /// Creates an error with the generic `validation_error` code.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "validation_error".to_string(),
            value: None,
            expected: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// A required value was absent.
    pub(crate) fn required(path: &JsonPath) -> Self {
        Self::new(path.clone(), format!("{} is required", path.describe()))
            .with_code("required")
            .with_expected("value")
    }

    /// The value is not of the node's kind, even after conversion.
    pub(crate) fn invalid_type(path: &JsonPath, expected: &str, value: Value) -> Self {
        let article = match expected.chars().next() {
            Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
            _ => "a",
        };
        Self::new(
            path.clone(),
            format!("{} must be {} {}", subject(path), article, expected),
        )
        .with_code("invalid_type")
        .with_expected(expected)
        .with_value(value)
    }
}

// Nodes are validated from several threads at once; errors cross those
// threads as return values.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// Renders a value for embedding in a message: strings raw, everything else
/// as compact JSON (`2.1`, `[1]`, `{"h2":1}`).
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The grammatical subject used by refinement messages: `the value of arr`,
/// or just `value` at the root.
pub(crate) fn subject(path: &JsonPath) -> String {
    if path.is_root() {
        "value".to_string()
    } else {
        format!("the value of {}", path)
    }
}
