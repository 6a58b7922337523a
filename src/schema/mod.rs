//! Schema definitions for validation.
//!
//! Every schema kind (array, number, string, boolean, object) implements
//! [`SchemaNode`] and is configured through the [`SchemaBuilder`] and
//! [`Composite`] builder traits. Validation stops at the first failure.
//!
//! # Example
//!
//! ```rust
//! use conform::{Composite, JsonPath, Schema, SchemaNode};
//! use serde_json::json;
//!
//! let schema = Schema::array().includes(Schema::number().integer());
//!
//! let result = schema.validate(&json!([1, "2", 3]), &JsonPath::root());
//! assert_eq!(result.into_result().unwrap(), json!([1, 2, 3]));
//! ```

mod array;
mod boolean;
mod flags;
mod matcher;
mod numeric;
mod object;
mod string;
mod traits;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use flags::{Composition, Flags};
pub use numeric::NumberSchema;
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use traits::{Composite, SchemaBuilder, SchemaKind, SchemaNode};

/// Entry point for creating validation schemas.
///
/// Each factory returns a fresh node with default flags: optional, empty
/// values allowed, `null` rejected, conversion on.
///
/// # Example
///
/// ```rust
/// use conform::{Composite, Schema, SchemaBuilder};
///
/// let tags = Schema::array()
///     .includes(Schema::string().min(1))
///     .non_empty()
///     .required();
///
/// let user = Schema::object()
///     .field("name", Schema::string().required())
///     .field("tags", tags);
/// ```
pub struct Schema;

impl Schema {
    /// Creates a new array schema.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conform::{Composite, JsonPath, Schema, SchemaNode};
    /// use serde_json::json;
    ///
    /// let schema = Schema::array().excludes(Schema::string());
    ///
    /// assert!(schema.validate(&json!([1, 2]), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!(["1"]), &JsonPath::root()).is_failure());
    /// ```
    pub fn array() -> ArraySchema {
        ArraySchema::new()
    }

    /// Creates a new number schema.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conform::{JsonPath, Schema, SchemaNode};
    /// use serde_json::json;
    ///
    /// let schema = Schema::number().integer();
    ///
    /// assert!(schema.validate(&json!(2), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!(2.1), &JsonPath::root()).is_failure());
    /// ```
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a new string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a new boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a new object schema with no declared fields.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conform::{JsonPath, Schema, SchemaBuilder, SchemaNode};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string().required())
    ///     .field("age", Schema::number().min(0.0));
    ///
    /// let result = schema.validate(&json!({"name": "Alice", "age": "30"}), &JsonPath::root());
    /// assert_eq!(result.into_result().unwrap(), json!({"name": "Alice", "age": 30}));
    /// ```
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }
}
