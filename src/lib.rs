//! # Conform
//!
//! A declarative validation engine for JSON values that stops at the first
//! violation and reports it with a precise, human-readable message.
//!
//! ## Overview
//!
//! A schema is a tree of nodes built with fluent calls. Validating a value
//! runs each node's pipeline: presence and `null` policy, an optional
//! conversion step that normalizes loosely-typed input (JSON text into
//! arrays, numeric text into numbers), and the kind's structural checks.
//! Composite kinds (arrays, objects) match their members against ordered
//! include and exclude lists of sub-schemas.
//!
//! ## Core Types
//!
//! - [`Schema`]: Entry point for creating validation schemas
//! - [`SchemaNode`]: The contract every kind implements
//! - [`SchemaBuilder`] / [`Composite`]: Fluent configuration
//! - [`SchemaError`]: The single error record of a failed validation
//! - [`JsonPath`]: Locations of values in nested input (e.g., `users[0].email`)
//! - [`Options`]: Per-node configuration, inherited by nested nodes
//!
//! ## Example
//!
//! ```rust
//! use conform::{validate, Composite, Schema, SchemaBuilder};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("name", Schema::string().required())
//!     .field("scores", Schema::array().includes(Schema::number().integer()));
//!
//! let valid = validate(&json!({"name": "Ada", "scores": "[1, 2, 3]"}), &schema).unwrap();
//! assert_eq!(valid, json!({"name": "Ada", "scores": [1, 2, 3]}));
//!
//! let error = validate(&json!({"name": "Ada", "scores": [1, 2, 2.1]}), &schema).unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "the value 2.1 in scores does not match any of the allowed types"
//! );
//! ```

mod driver;
pub mod error;
pub mod path;
pub mod schema;
pub mod validation;

pub use driver::{validate, validate_batch};
pub use error::SchemaError;
pub use path::{JsonPath, PathSegment};
pub use schema::{
    ArraySchema, BooleanSchema, Composite, Composition, Flags, NumberSchema, ObjectSchema, Schema,
    SchemaBuilder, SchemaKind, SchemaNode, StringSchema,
};
pub use validation::{Options, ValidationContext};

/// Result of validating a single present value: the normalized value, or the
/// first violation found.
pub type Outcome = stillwater::Validation<serde_json::Value, SchemaError>;
