//! Error types for validation failures.
//!
//! This module provides [`SchemaError`], the one diagnostic a failed
//! validation reports.

mod schema_error;

pub use schema_error::SchemaError;
pub(crate) use schema_error::{display_value, subject};
