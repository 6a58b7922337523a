//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating numbers with
//! integer, minimum and maximum refinements. Numeric text is converted to a
//! number when conversion is enabled.

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::{subject, SchemaError};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::flags::Flags;
use super::traits::{SchemaBuilder, SchemaKind, SchemaNode};

/// A refinement applied to numeric values.
#[derive(Clone)]
enum NumberConstraint {
    Integer { message: Option<String> },
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
}

/// A schema for numeric values.
///
/// Refinements are checked in the order they were added; the first one that
/// fails is reported.
///
/// # Example
///
/// ```rust
/// use conform::{JsonPath, Schema, SchemaNode};
/// use serde_json::json;
///
/// let schema = Schema::number().integer().min(3.0);
///
/// assert!(schema.validate(&json!(5), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!(2.1), &JsonPath::root()).is_failure());
///
/// // Numeric text is converted
/// let result = schema.validate(&json!("42"), &JsonPath::root());
/// assert_eq!(result.into_result().unwrap(), json!(42));
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    flags: Flags,
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            flags: Flags::default(),
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// The number must have no fractional part (`2.0` passes, `2.1` fails).
    pub fn integer(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Integer { message: None });
        self
    }

    /// The number must be at least `value` (inclusive).
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// The number must be at most `value` (inclusive).
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Sets a custom error message for the most recent refinement.
    ///
    /// If no refinements have been added yet, this sets the message used when
    /// the value is not a number.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                NumberConstraint::Integer { message: m } => *m = Some(message.into()),
                NumberConstraint::Min { message: m, .. } => *m = Some(message.into()),
                NumberConstraint::Max { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaNode for NumberSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Number
    }

    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn convert(&self, raw: &Value) -> Value {
        match raw {
            Value::String(text) => parse_number(text).unwrap_or_else(|| raw.clone()),
            other => other.clone(),
        }
    }

    fn check(
        &self,
        value: Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<Value, SchemaError> {
        let n = match &value {
            Value::Number(n) => n.clone(),
            _ => {
                let mut error = SchemaError::invalid_type(path, "number", value);
                if let Some(message) = &self.type_error_message {
                    error.message = message.clone();
                }
                return Validation::Failure(error);
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, &n, path))
        {
            Some(error) => Validation::Failure(error.with_value(value)),
            None => Validation::Success(value),
        }
    }
}

impl SchemaBuilder for NumberSchema {
    fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }
}

/// Parses numeric text into a JSON number. Integral text stays integral.
fn parse_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::from(i));
    }

    let unsigned = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let f = trimmed.parse::<f64>().ok()?;
    Number::from_f64(f).map(Value::Number)
}

fn is_integral(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
}

/// Checks a single refinement and returns an error if it fails.
fn check_constraint(
    constraint: &NumberConstraint,
    n: &Number,
    path: &JsonPath,
) -> Option<SchemaError> {
    let value = n.as_f64().unwrap_or(f64::NAN);
    match constraint {
        NumberConstraint::Integer { message } if !is_integral(n) => {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("{} must be an integer", subject(path)));
            Some(
                SchemaError::new(path.clone(), msg)
                    .with_code("integer")
                    .with_expected("integer"),
            )
        }
        NumberConstraint::Min { value: min, message } if value < *min => {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("{} must be at least {}, got {}", subject(path), min, n));
            Some(
                SchemaError::new(path.clone(), msg)
                    .with_code("min_value")
                    .with_expected(format!("at least {}", min)),
            )
        }
        NumberConstraint::Max { value: max, message } if value > *max => {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("{} must be at most {}, got {}", subject(path), max, n));
            Some(
                SchemaError::new(path.clone(), msg)
                    .with_code("max_value")
                    .with_expected(format!("at most {}", max)),
            )
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_integers_and_floats() {
        let schema = NumberSchema::new();
        assert_eq!(unwrap_success(schema.validate(&json!(42), &JsonPath::root())), json!(42));
        assert_eq!(unwrap_success(schema.validate(&json!(-1.5), &JsonPath::root())), json!(-1.5));
    }

    #[test]
    fn test_rejects_non_numbers() {
        let schema = NumberSchema::new();

        let error = unwrap_failure(schema.validate(&json!("a"), &JsonPath::root().push_field("n")));
        assert_eq!(error.code, "invalid_type");
        assert_eq!(error.message, "the value of n must be a number");

        assert!(schema.validate(&json!([1]), &JsonPath::root()).is_failure());
        assert!(schema.validate(&json!(true), &JsonPath::root()).is_failure());
        assert!(schema.validate(&json!(null), &JsonPath::root()).is_failure());
    }

    #[test]
    fn test_converts_numeric_text() {
        let schema = NumberSchema::new();
        assert_eq!(schema.convert(&json!("3")), json!(3));
        assert_eq!(schema.convert(&json!(" -7 ")), json!(-7));
        assert_eq!(schema.convert(&json!("2.5")), json!(2.5));
        assert_eq!(schema.convert(&json!("abc")), json!("abc"));
        assert_eq!(schema.convert(&json!("inf")), json!("inf"));
        assert_eq!(schema.convert(&json!("")), json!(""));
        assert_eq!(schema.convert(&json!(true)), json!(true));
    }

    #[test]
    fn test_strict_options_skip_conversion() {
        let schema = NumberSchema::new().options(crate::Options::strict());
        assert!(schema.validate(&json!("3"), &JsonPath::root()).is_failure());
    }

    #[test]
    fn test_integer_refinement() {
        let schema = NumberSchema::new().integer();
        assert!(schema.validate(&json!(2), &JsonPath::root()).is_success());
        assert!(schema.validate(&json!(2.0), &JsonPath::root()).is_success());

        let error = unwrap_failure(schema.validate(&json!(2.1), &JsonPath::root()));
        assert_eq!(error.code, "integer");
        assert_eq!(error.value, Some(json!(2.1)));
    }

    #[test]
    fn test_min_and_max() {
        let schema = NumberSchema::new().min(3.0).max(10.0);

        assert!(schema.validate(&json!(3), &JsonPath::root()).is_success());
        assert!(schema.validate(&json!(10), &JsonPath::root()).is_success());

        let error = unwrap_failure(schema.validate(&json!(1), &JsonPath::root()));
        assert_eq!(error.code, "min_value");
        assert_eq!(error.message, "value must be at least 3, got 1");

        let error = unwrap_failure(schema.validate(&json!(11.5), &JsonPath::root()));
        assert_eq!(error.code, "max_value");
    }

    #[test]
    fn test_first_failing_refinement_wins() {
        let schema = NumberSchema::new().integer().min(5.0);
        let error = unwrap_failure(schema.validate(&json!(1.5), &JsonPath::root()));
        assert_eq!(error.code, "integer");
    }

    #[test]
    fn test_custom_messages() {
        let schema = NumberSchema::new().error("age must be numeric").min(18.0).error("too young");

        let error = unwrap_failure(schema.validate(&json!("x"), &JsonPath::root()));
        assert_eq!(error.message, "age must be numeric");

        let error = unwrap_failure(schema.validate(&json!(16), &JsonPath::root()));
        assert_eq!(error.message, "too young");
    }
}
