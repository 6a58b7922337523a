//! Integration tests for the top-level validate entry points.

use conform::{validate, validate_batch, Composite, Options, Schema, SchemaBuilder};
use pretty_assertions::assert_eq;
use serde_json::json;

fn order_schema() -> conform::ObjectSchema {
    Schema::object()
        .field("id", Schema::string().pattern(r"^ord-\d+$").unwrap().required())
        .field("quantity", Schema::number().integer().min(1.0).required())
        .field("items", Schema::array().includes(Schema::string()).non_empty())
        .field("gift", Schema::boolean())
}

#[test]
fn test_valid_input_is_normalized() {
    let result = validate(
        &json!({"id": "ord-1", "quantity": "2", "items": "[\"pen\"]", "gift": "TRUE", "note": 5}),
        &order_schema(),
    )
    .unwrap();

    assert_eq!(
        result,
        json!({"id": "ord-1", "quantity": 2, "items": ["pen"], "gift": true, "note": 5})
    );
}

#[test]
fn test_first_failure_in_declaration_order() {
    let error = validate(&json!({"quantity": 0, "items": []}), &order_schema()).unwrap_err();
    assert_eq!(error.message, "id is required");

    let error = validate(&json!({"id": "ord-1", "quantity": 0}), &order_schema()).unwrap_err();
    assert_eq!(error.message, "the value of quantity must be at least 1, got 0");

    let error = validate(&json!({"id": "ord-1", "quantity": 1, "items": []}), &order_schema())
        .unwrap_err();
    assert_eq!(error.code, "empty");
}

#[test]
fn test_error_display_is_the_message() {
    let error = validate(&json!({"id": "ord-1", "quantity": 1, "items": [1]}), &order_schema())
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "the value 1 in items does not match any of the allowed types"
    );
}

#[test]
fn test_schema_options_apply_at_root() {
    let schema = Schema::object()
        .field("n", Schema::number())
        .options(Options::strict());

    assert!(validate(&json!({"n": "1"}), &schema).is_err());
    assert!(validate(&json!({"n": 1}), &schema).is_ok());
}

#[test]
fn test_non_object_input() {
    let error = validate(&json!("not an object"), &order_schema()).unwrap_err();
    assert_eq!(error.message, "value must be an object");
}

#[test]
fn test_batch_matches_sequential() {
    let schema = order_schema();
    let inputs: Vec<_> = (0..50)
        .map(|i| json!({"id": format!("ord-{}", i), "quantity": i % 3}))
        .collect();

    let parallel = validate_batch(&inputs, &schema);
    let sequential: Vec<_> = inputs.iter().map(|input| validate(input, &schema)).collect();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel.iter().filter(|r| r.is_err()).count(), 17);
}
