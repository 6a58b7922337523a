//! The schema node contract and the fluent builder surface.
//!
//! Every kind (array, number, string, boolean, object) implements
//! [`SchemaNode`]. The provided `validate*` methods run the shared pipeline;
//! a kind only supplies its tag, its flags, its conversion and its
//! structural check.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;
use tracing::trace;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{Options, ValidationContext};
use crate::Outcome;

use super::flags::{Composition, Flags};

/// Tag identifying the kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Array,
    Number,
    String,
    Boolean,
    Object,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaKind::Array => "array",
            SchemaKind::Number => "number",
            SchemaKind::String => "string",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A self-describing validation unit.
///
/// Validation of a possibly-absent value runs, in order:
///
/// 1. absence: fails with `required` if the node is required, otherwise passes
/// 2. `null`: passes unchanged if the node is `null_ok()`
/// 3. conversion: [`convert`](SchemaNode::convert), if the effective
///    `convert` option is on
/// 4. [`check`](SchemaNode::check): kind-specific structure, refinements and,
///    for composite kinds, the include/exclude matcher
///
/// The first failure ends the pass. Validation only reads the node, so a
/// fully-built node can be shared across threads.
///
/// # Example
///
/// ```rust
/// use conform::{Composite, JsonPath, Schema, SchemaNode};
/// use serde_json::json;
///
/// let schema = Schema::array().includes(Schema::number());
///
/// assert!(schema.validate(&json!([1, 2, 3]), &JsonPath::root()).is_success());
/// assert!(schema.validate_field(None, &JsonPath::root()).is_success());
/// ```
pub trait SchemaNode: Send + Sync {
    fn kind(&self) -> SchemaKind;

    fn flags(&self) -> &Flags;

    /// Best-effort coercion of raw input toward this kind. Never fails: input
    /// that cannot be coerced is returned unchanged.
    fn convert(&self, raw: &Value) -> Value;

    /// Structural checks on a present, non-null, already-converted value.
    ///
    /// `context` is this node's effective context; composite kinds pass it
    /// on to their sub-schemas. Returns the normalized value on success.
    fn check(
        &self,
        value: Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Value, SchemaError>;

    /// Runs the full pipeline under an inherited context.
    ///
    /// `None` stands for an absent value; a successful absent value yields
    /// `Success(None)`.
    fn validate_with_context(
        &self,
        value: Option<&Value>,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Option<Value>, SchemaError> {
        let flags = self.flags();
        let value = match value {
            Some(value) => value,
            None if flags.required => return Validation::Failure(SchemaError::required(path)),
            None => return Validation::Success(None),
        };

        if value.is_null() && flags.null_allowed {
            return Validation::Success(Some(Value::Null));
        }

        let context = context.narrow(flags.options);
        let value = if context.convert() {
            let converted = self.convert(value);
            if &converted != value {
                trace!(path = %path, kind = %self.kind(), "converted input");
            }
            converted
        } else {
            value.clone()
        };

        self.check(value, path, &context).map(Some)
    }

    /// Validates a present value with default options.
    fn validate(&self, value: &Value, path: &JsonPath) -> Outcome {
        self.validate_with_context(Some(value), path, &ValidationContext::default())
            .map(|normalized| normalized.unwrap_or(Value::Null))
    }

    /// Validates a value that may be absent, with default options.
    fn validate_field(
        &self,
        value: Option<&Value>,
        path: &JsonPath,
    ) -> Validation<Option<Value>, SchemaError> {
        self.validate_with_context(value, path, &ValidationContext::default())
    }
}

/// A node shared behind an `Arc` is still a node, so one instance can be
/// included by several parents.
impl<T: SchemaNode + ?Sized> SchemaNode for Arc<T> {
    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }

    fn flags(&self) -> &Flags {
        (**self).flags()
    }

    fn convert(&self, raw: &Value) -> Value {
        (**self).convert(raw)
    }

    fn check(
        &self,
        value: Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Value, SchemaError> {
        (**self).check(value, path, context)
    }

    fn validate_with_context(
        &self,
        value: Option<&Value>,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Option<Value>, SchemaError> {
        (**self).validate_with_context(value, path, context)
    }
}

/// Fluent configuration shared by every kind.
///
/// Each call consumes the node, updates its flags and hands the same node
/// back, so a chain of calls configures one instance. Once a node has been
/// placed inside a parent it sits behind an `Arc` and can no longer be
/// reconfigured.
pub trait SchemaBuilder: SchemaNode + Sized {
    fn flags_mut(&mut self) -> &mut Flags;

    /// Absent values fail validation.
    fn required(mut self) -> Self {
        self.flags_mut().required = true;
        self
    }

    /// Absent values pass validation (the default).
    fn optional(mut self) -> Self {
        self.flags_mut().required = false;
        self
    }

    /// Empty arrays, strings and objects pass (the default).
    fn empty_ok(mut self) -> Self {
        self.flags_mut().empty_allowed = true;
        self
    }

    /// Empty arrays, strings and objects fail with `empty`.
    fn non_empty(mut self) -> Self {
        self.flags_mut().empty_allowed = false;
        self
    }

    /// `null` passes unchanged.
    fn null_ok(mut self) -> Self {
        self.flags_mut().null_allowed = true;
        self
    }

    fn options(mut self, options: Options) -> Self {
        self.flags_mut().options = options;
        self
    }
}

/// Include/exclude configuration of composite kinds.
///
/// # Example
///
/// ```rust
/// use conform::{Composite, JsonPath, Schema, SchemaNode};
/// use serde_json::json;
///
/// let schema = Schema::array().excludes(Schema::string());
///
/// assert!(schema.validate(&json!([2]), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!(["1"]), &JsonPath::root()).is_failure());
/// ```
pub trait Composite: SchemaBuilder {
    fn composition_mut(&mut self) -> &mut Composition;

    /// Appends an allowed member schema. Members must match at least one.
    fn includes<S>(mut self, schema: S) -> Self
    where
        S: SchemaNode + 'static,
    {
        self.composition_mut().include(Arc::new(schema));
        self
    }

    /// Appends a forbidden member schema. Members must match none.
    fn excludes<S>(mut self, schema: S) -> Self
    where
        S: SchemaNode + 'static,
    {
        self.composition_mut().exclude(Arc::new(schema));
        self
    }
}
