//! Array schema validation.
//!
//! This module provides [`ArraySchema`], which converts loosely-typed input
//! (JSON text, bare numeric text) into arrays, enforces the empty and length
//! policy, and matches every element against its include/exclude lists.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{subject, SchemaError};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::flags::{Composition, Flags};
use super::matcher::match_elements;
use super::traits::{Composite, SchemaBuilder, SchemaKind, SchemaNode};

/// A length constraint applied to array values.
enum ArrayConstraint {
    MinLength { min: usize },
    MaxLength { max: usize },
}

/// A schema for array values.
///
/// With no includes or excludes every element is accepted. Empty arrays are
/// accepted unless [`non_empty`](SchemaBuilder::non_empty) is set.
///
/// # Example
///
/// ```rust
/// use conform::{Composite, JsonPath, Schema, SchemaNode};
/// use serde_json::json;
///
/// let schema = Schema::array().includes(Schema::number()).includes(Schema::string());
///
/// assert!(schema.validate(&json!([1, "a", 5, 10]), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!([1, 2, [1]]), &JsonPath::root()).is_failure());
///
/// // JSON text is converted before the structural check
/// let result = schema.validate(&json!("[1, 2, 3]"), &JsonPath::root());
/// assert_eq!(result.into_result().unwrap(), json!([1, 2, 3]));
/// ```
pub struct ArraySchema {
    flags: Flags,
    composition: Composition,
    constraints: Vec<ArrayConstraint>,
}

impl ArraySchema {
    pub fn new() -> Self {
        Self {
            flags: Flags::default(),
            composition: Composition::default(),
            constraints: Vec::new(),
        }
    }

    /// The array must have at least `min` elements.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.push(ArrayConstraint::MinLength { min });
        self
    }

    /// The array must have at most `max` elements.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints.push(ArrayConstraint::MaxLength { max });
        self
    }

    fn check_length(&self, elements: &[Value], path: &JsonPath) -> Option<SchemaError> {
        let len = elements.len();
        let value = || Value::Array(elements.to_vec());

        if len == 0 && !self.flags.empty_allowed {
            return Some(
                SchemaError::new(path.clone(), format!("{} must not be empty", subject(path)))
                    .with_code("empty")
                    .with_expected("at least 1 item")
                    .with_value(value()),
            );
        }

        self.constraints.iter().find_map(|constraint| match constraint {
            ArrayConstraint::MinLength { min } if len < *min => Some(
                SchemaError::new(
                    path.clone(),
                    format!("{} must have at least {} items, got {}", subject(path), min, len),
                )
                .with_code("min_length")
                .with_expected(format!("at least {} items", min))
                .with_value(value()),
            ),
            ArrayConstraint::MaxLength { max } if len > *max => Some(
                SchemaError::new(
                    path.clone(),
                    format!("{} must have at most {} items, got {}", subject(path), max, len),
                )
                .with_code("max_length")
                .with_expected(format!("at most {} items", max))
                .with_value(value()),
            ),
            _ => None,
        })
    }
}

impl Default for ArraySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaNode for ArraySchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Array
    }

    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn convert(&self, raw: &Value) -> Value {
        convert_to_array(raw)
    }

    fn check(
        &self,
        value: Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Value, SchemaError> {
        let elements = match value {
            Value::Array(elements) => elements,
            other => return Validation::Failure(SchemaError::invalid_type(path, "array", other)),
        };

        if let Some(error) = self.check_length(&elements, path) {
            return Validation::Failure(error);
        }

        match_elements(&self.composition, elements, path, context).map(Value::Array)
    }
}

impl SchemaBuilder for ArraySchema {
    fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }
}

impl Composite for ArraySchema {
    fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }
}

/// Normalizes raw input into an array candidate.
///
/// - arrays, non-text scalars and objects are returned unchanged
/// - numeric-looking text becomes a one-element array holding the original
///   text (`"3"` becomes `["3"]`, not `[3]`)
/// - other text is parsed as JSON: an array is returned as-is, any other
///   JSON value is wrapped in a one-element array
/// - text that is not valid JSON is returned unchanged (`"asdf"`)
fn convert_to_array(raw: &Value) -> Value {
    let text = match raw {
        Value::String(text) => text,
        other => return other.clone(),
    };

    if looks_numeric(text) {
        return Value::Array(vec![raw.clone()]);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Value::Array(items),
        Ok(parsed) => Value::Array(vec![parsed]),
        Err(_) => raw.clone(),
    }
}

/// Whether text reads as a number under loose numeric coercion: blank text,
/// decimal and exponent literals, `0x` hex literals and signed `Infinity`.
fn looks_numeric(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let unsigned = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return true;
    }

    // Rust's float grammar also accepts "inf" and "nan"; those are not numbers here.
    unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') && trimmed.parse::<f64>().is_ok()
}
