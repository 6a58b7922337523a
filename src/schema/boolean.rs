//! Boolean schema validation.

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::flags::Flags;
use super::traits::{SchemaBuilder, SchemaKind, SchemaNode};

/// A schema for boolean values.
///
/// The text `"true"` and `"false"` (any case, surrounding whitespace ignored)
/// is converted when conversion is enabled.
#[derive(Clone, Default)]
pub struct BooleanSchema {
    flags: Flags,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaNode for BooleanSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Boolean
    }

    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn convert(&self, raw: &Value) -> Value {
        match raw {
            Value::String(text) if text.trim().eq_ignore_ascii_case("true") => Value::Bool(true),
            Value::String(text) if text.trim().eq_ignore_ascii_case("false") => Value::Bool(false),
            other => other.clone(),
        }
    }

    fn check(
        &self,
        value: Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<Value, SchemaError> {
        if value.is_boolean() {
            Validation::Success(value)
        } else {
            Validation::Failure(SchemaError::invalid_type(path, "boolean", value))
        }
    }
}

impl SchemaBuilder for BooleanSchema {
    fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }
}
