//! Top-level entry points over a flat map of named fields.

use rayon::prelude::*;
use serde_json::{Map, Value};
use stillwater::Validation;
use tracing::debug;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::schema::{ObjectSchema, SchemaNode};
use crate::validation::ValidationContext;

/// Validates `input` field by field against the nodes declared on `schema`.
///
/// Fields are visited in declaration order and each node sees the input's
/// value for its name, or nothing when the key is absent. Input keys without
/// a node are copied to the output unchecked. The first failure is returned
/// as-is.
///
/// Unlike [`ObjectSchema::validate`](SchemaNode::validate), this does not
/// apply the schema's own presence, emptiness or unknown-key rules; only its
/// options are honored.
///
/// # Example
///
/// ```rust
/// use conform::{validate, Composite, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object().field("arr", Schema::array().includes(Schema::number().integer()));
///
/// let error = validate(&json!({"arr": [1, 2, 2.1]}), &schema).unwrap_err();
/// assert_eq!(error.message, "the value 2.1 in arr does not match any of the allowed types");
/// ```
pub fn validate(input: &Value, schema: &ObjectSchema) -> Result<Value, SchemaError> {
    let root = JsonPath::root();
    let input = match input {
        Value::Object(input) => input,
        other => return Err(SchemaError::invalid_type(&root, "object", other.clone())),
    };

    let context = ValidationContext::new(schema.flags().options);
    let mut validated = Map::new();

    for (name, node) in schema.fields() {
        let path = root.push_field(name);
        match node.validate_with_context(input.get(name), &path, &context) {
            Validation::Success(Some(value)) => {
                validated.insert(name.to_string(), value);
            }
            Validation::Success(None) => {}
            Validation::Failure(error) => {
                debug!(field = name, code = %error.code, "field failed validation");
                return Err(error);
            }
        }
    }

    for (key, value) in input {
        if !schema.has_field(key) {
            validated.insert(key.clone(), value.clone());
        }
    }

    Ok(Value::Object(validated))
}

/// Validates independent inputs against one shared schema in parallel.
///
/// Results are returned in input order.
pub fn validate_batch(inputs: &[Value], schema: &ObjectSchema) -> Vec<Result<Value, SchemaError>> {
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| validate(input, schema))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    debug!(total = results.len(), failed, "batch validation complete");
    results
}
