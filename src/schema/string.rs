//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length and regex refinements. Strings are never produced by conversion:
//! a number stays a number and fails the type check.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{subject, SchemaError};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::flags::Flags;
use super::traits::{SchemaBuilder, SchemaKind, SchemaNode};

/// A refinement applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

/// A schema for string values.
///
/// Lengths count Unicode scalar values, not bytes.
///
/// # Example
///
/// ```rust
/// use conform::{JsonPath, Schema, SchemaNode};
/// use serde_json::json;
///
/// let schema = Schema::string().min(5);
///
/// assert!(schema.validate(&json!("12345"), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!("1"), &JsonPath::root()).is_failure());
/// assert!(schema.validate(&json!(12345), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct StringSchema {
    flags: Flags,
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            flags: Flags::default(),
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// The string must have at least `min` characters.
    pub fn min(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// The string must have at most `max` characters.
    pub fn max(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// The string must match `pattern`.
    ///
    /// Returns an error if the pattern is not a valid regex.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conform::{JsonPath, Schema, SchemaNode};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().pattern(r"^\d+$").unwrap();
    ///
    /// assert!(schema.validate(&json!("12345"), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!("abc"), &JsonPath::root()).is_failure());
    /// ```
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Sets a custom error message for the most recent refinement.
    ///
    /// If no refinements have been added yet, this sets the message used when
    /// the value is not a string.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                StringConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Pattern { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaNode for StringSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::String
    }

    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn convert(&self, raw: &Value) -> Value {
        raw.clone()
    }

    fn check(
        &self,
        value: Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<Value, SchemaError> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                let mut error = SchemaError::invalid_type(path, "string", value);
                if let Some(message) = &self.type_error_message {
                    error.message = message.clone();
                }
                return Validation::Failure(error);
            }
        };

        if s.is_empty() && !self.flags.empty_allowed {
            let error = SchemaError::new(path.clone(), format!("{} must not be empty", subject(path)))
                .with_code("empty")
                .with_expected("at least 1 character");
            return Validation::Failure(error.with_value(value));
        }

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, s, path))
        {
            Some(error) => Validation::Failure(error.with_value(value)),
            None => Validation::Success(value),
        }
    }
}

impl SchemaBuilder for StringSchema {
    fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }
}

/// Checks a single refinement and returns an error if it fails.
fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &JsonPath,
) -> Option<SchemaError> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("{} must have at least {} characters, got {}", subject(path), min, len)
                });
                SchemaError::new(path.clone(), msg)
                    .with_code("min_length")
                    .with_expected(format!("at least {} characters", min))
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("{} must have at most {} characters, got {}", subject(path), max, len)
                });
                SchemaError::new(path.clone(), msg)
                    .with_code("max_length")
                    .with_expected(format!("at most {} characters", max))
            })
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("{} must match pattern '{}'", subject(path), regex));
            SchemaError::new(path.clone(), msg)
                .with_code("pattern")
                .with_expected(format!("string matching '{}'", regex))
        }),
    }
}
