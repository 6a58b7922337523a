//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects with
//! typed fields. Keys that are not declared fields are either rejected or
//! matched against the object's include/exclude lists.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{subject, SchemaError};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::flags::{Composition, Flags};
use super::matcher::match_member;
use super::traits::{Composite, SchemaBuilder, SchemaKind, SchemaNode};

/// A schema for JSON objects.
///
/// Fields are validated in declaration order and the first failure is
/// reported. Whether a field may be absent is decided by the field's own
/// node (`required()`), not by the object. Unknown keys are allowed by
/// default; when the object has includes or excludes, their values must
/// match them.
///
/// # Example
///
/// ```rust
/// use conform::{JsonPath, Schema, SchemaBuilder, SchemaNode};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().required())
///     .field("age", Schema::number().integer());
///
/// assert!(schema.validate(&json!({"name": "Alice", "age": 30}), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!({"age": 30}), &JsonPath::root()).is_failure());
/// ```
pub struct ObjectSchema {
    flags: Flags,
    fields: IndexMap<String, Arc<dyn SchemaNode>>,
    composition: Composition,
    allow_unknown: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self {
            flags: Flags::default(),
            fields: IndexMap::new(),
            composition: Composition::default(),
            allow_unknown: true,
        }
    }

    /// Declares a field. Declaring the same name twice replaces the first
    /// node but keeps its position.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaNode + 'static,
    {
        self.fields.insert(name.into(), Arc::new(schema));
        self
    }

    /// Whether keys that are not declared fields are accepted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conform::{JsonPath, Schema, SchemaNode};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string())
    ///     .allow_unknown(false);
    ///
    /// let result = schema.validate(&json!({"name": "Alice", "role": "admin"}), &JsonPath::root());
    /// assert_eq!(result.into_result().unwrap_err().code, "unknown_key");
    /// ```
    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Arc<dyn SchemaNode>)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn check_unknown(
        &self,
        key: &str,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Value, SchemaError> {
        let key_path = path.push_field(key);
        if !self.allow_unknown {
            return Validation::Failure(
                SchemaError::new(key_path, format!("the key {} is not allowed", key))
                    .with_code("unknown_key")
                    .with_value(value.clone()),
            );
        }
        match_member(&self.composition, value, path, &key_path, context)
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaNode for ObjectSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Object
    }

    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn convert(&self, raw: &Value) -> Value {
        match raw {
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(parsed @ Value::Object(_)) => parsed,
                _ => raw.clone(),
            },
            other => other.clone(),
        }
    }

    fn check(
        &self,
        value: Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Value, SchemaError> {
        let input = match value {
            Value::Object(input) => input,
            other => return Validation::Failure(SchemaError::invalid_type(path, "object", other)),
        };

        if input.is_empty() && !self.flags.empty_allowed {
            return Validation::Failure(
                SchemaError::new(path.clone(), format!("{} must not be empty", subject(path)))
                    .with_code("empty")
                    .with_expected("at least 1 key")
                    .with_value(Value::Object(input)),
            );
        }

        let mut validated = Map::new();

        for (name, node) in &self.fields {
            match node.validate_with_context(input.get(name), &path.push_field(name), context) {
                Validation::Success(Some(v)) => {
                    validated.insert(name.clone(), v);
                }
                Validation::Success(None) => {}
                Validation::Failure(error) => return Validation::Failure(error),
            }
        }

        for (key, member) in &input {
            if self.has_field(key) {
                continue;
            }
            match self.check_unknown(key, member, path, context) {
                Validation::Success(v) => {
                    validated.insert(key.clone(), v);
                }
                Validation::Failure(error) => return Validation::Failure(error),
            }
        }

        Validation::Success(Value::Object(validated))
    }
}

impl SchemaBuilder for ObjectSchema {
    fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }
}

impl Composite for ObjectSchema {
    fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArraySchema, NumberSchema, StringSchema};
    use crate::Options;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_empty_object_schema() {
        let schema = ObjectSchema::new();
        assert!(schema.validate(&json!({}), &JsonPath::root()).is_success());
        assert!(schema.validate(&json!({"a": 1}), &JsonPath::root()).is_success());
    }

    #[test]
    fn test_rejects_non_object() {
        let schema = ObjectSchema::new();

        let error = unwrap_failure(schema.validate(&json!([1]), &JsonPath::root()));
        assert_eq!(error.code, "invalid_type");
        assert_eq!(error.message, "value must be an object");

        assert!(schema.validate(&json!(42), &JsonPath::root()).is_failure());
        assert!(schema.validate(&json!(null), &JsonPath::root()).is_failure());
    }

    #[test]
    fn test_converts_object_text() {
        let schema = ObjectSchema::new();
        assert_eq!(schema.convert(&json!("{\"a\": 1}")), json!({"a": 1}));
        assert_eq!(schema.convert(&json!("[1]")), json!("[1]"));
        assert_eq!(schema.convert(&json!("nope")), json!("nope"));
    }

    #[test]
    fn test_required_field() {
        let schema = ObjectSchema::new().field("name", StringSchema::new().required());

        assert!(schema.validate(&json!({"name": "Alice"}), &JsonPath::root()).is_success());

        let error = unwrap_failure(schema.validate(&json!({}), &JsonPath::root()));
        assert_eq!(error.code, "required");
        assert_eq!(error.path.to_string(), "name");
        assert_eq!(error.message, "name is required");
    }

    #[test]
    fn test_optional_field_is_omitted_from_output() {
        let schema = ObjectSchema::new().field("nickname", StringSchema::new());
        assert_eq!(unwrap_success(schema.validate(&json!({}), &JsonPath::root())), json!({}));
    }

    #[test]
    fn test_first_failing_field_in_declaration_order() {
        let schema = ObjectSchema::new()
            .field("z", StringSchema::new().required())
            .field("a", StringSchema::new().required());

        let error = unwrap_failure(schema.validate(&json!({}), &JsonPath::root()));
        assert_eq!(error.path.to_string(), "z");
    }

    #[test]
    fn test_fields_are_normalized() {
        let schema = ObjectSchema::new()
            .field("age", NumberSchema::new())
            .field("tags", ArraySchema::new());

        let result = schema.validate(&json!({"age": "30", "tags": "[\"a\"]"}), &JsonPath::root());
        assert_eq!(unwrap_success(result), json!({"age": 30, "tags": ["a"]}));
    }

    #[test]
    fn test_nested_path_tracking() {
        let inner = ObjectSchema::new().field("value", NumberSchema::new().min(0.0));
        let middle = ObjectSchema::new().field("inner", inner);
        let outer = ObjectSchema::new().field("middle", middle);

        let error = unwrap_failure(outer.validate(
            &json!({"middle": {"inner": {"value": -5}}}),
            &JsonPath::root(),
        ));
        assert_eq!(error.path.to_string(), "middle.inner.value");
    }

    #[test]
    fn test_unknown_keys_allowed_and_copied() {
        let schema = ObjectSchema::new().field("name", StringSchema::new());
        let result = schema.validate(&json!({"name": "Alice", "extra": [1]}), &JsonPath::root());
        assert_eq!(unwrap_success(result), json!({"name": "Alice", "extra": [1]}));
    }

    #[test]
    fn test_unknown_keys_denied() {
        let schema = ObjectSchema::new()
            .field("name", StringSchema::new())
            .allow_unknown(false);

        let error = unwrap_failure(schema.validate(&json!({"name": "A", "role": "x"}), &JsonPath::root()));
        assert_eq!(error.code, "unknown_key");
        assert_eq!(error.path.to_string(), "role");
        assert_eq!(error.message, "the key role is not allowed");
    }

    #[test]
    fn test_unknown_keys_matched_against_includes() {
        let schema = ObjectSchema::new()
            .field("id", StringSchema::new())
            .includes(NumberSchema::new());

        let result = schema.validate(&json!({"id": "x", "a": 1, "b": "2"}), &JsonPath::root());
        assert_eq!(unwrap_success(result), json!({"id": "x", "a": 1, "b": 2}));

        let error = unwrap_failure(schema.validate(&json!({"id": "x", "c": true}), &JsonPath::root()));
        assert_eq!(error.code, "not_included");
        assert_eq!(error.path.to_string(), "c");
        assert_eq!(
            error.message,
            "the value true in value does not match any of the allowed types"
        );
    }

    #[test]
    fn test_unknown_keys_matched_against_excludes() {
        let schema = ObjectSchema::new().excludes(StringSchema::new());
        assert!(schema.validate(&json!({"a": 1}), &JsonPath::root()).is_success());
        let error = unwrap_failure(schema.validate(&json!({"a": "x"}), &JsonPath::root()));
        assert_eq!(error.code, "excluded");
    }

    #[test]
    fn test_non_empty() {
        let schema = ObjectSchema::new().non_empty();
        let error = unwrap_failure(schema.validate(&json!({}), &JsonPath::root()));
        assert_eq!(error.code, "empty");
    }

    #[test]
    fn test_strict_options_reach_nested_fields() {
        let schema = ObjectSchema::new()
            .field("array", ArraySchema::new())
            .field("count", NumberSchema::new())
            .options(Options::strict());

        assert!(schema.validate(&json!({"array": "[1]"}), &JsonPath::root()).is_failure());
        assert!(schema.validate(&json!({"count": "3"}), &JsonPath::root()).is_failure());
        assert!(schema.validate(&json!({"array": [1], "count": 3}), &JsonPath::root()).is_success());
    }

    #[test]
    fn test_shared_node_in_several_parents() {
        let email: Arc<dyn SchemaNode> = Arc::new(StringSchema::new().min(3).required());
        let user = ObjectSchema::new().field("email", Arc::clone(&email));
        let admin = ObjectSchema::new().field("email", Arc::clone(&email));

        assert!(user.validate(&json!({"email": "a@b"}), &JsonPath::root()).is_success());
        assert!(admin.validate(&json!({}), &JsonPath::root()).is_failure());
        assert_eq!(user.fields().count(), 1);
    }
}
