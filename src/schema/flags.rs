//! Per-node constraint state shared by every schema kind.
//!
//! [`Flags`] holds the required/empty/null policy and the node's options;
//! [`Composition`] holds the include and exclude lists of composite kinds.

use std::fmt;
use std::sync::Arc;

use crate::validation::Options;

use super::traits::SchemaNode;

/// Presence and conversion policy of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// An absent value is a failure.
    pub required: bool,
    /// Empty arrays, strings and objects are accepted.
    pub empty_allowed: bool,
    /// `null` is accepted as-is, skipping conversion and refinements.
    pub null_allowed: bool,
    pub options: Options,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            required: false,
            empty_allowed: true,
            null_allowed: false,
            options: Options::default(),
        }
    }
}

/// Allow-list and deny-list of sub-schemas for the members of a composite
/// value (array elements, undeclared object fields).
///
/// Both lists keep insertion order, which is the order candidates are tried.
/// An empty include list places no type restriction on members; an empty
/// exclude list forbids nothing.
#[derive(Clone, Default)]
pub struct Composition {
    includes: Vec<Arc<dyn SchemaNode>>,
    excludes: Vec<Arc<dyn SchemaNode>>,
}

impl Composition {
    pub fn include(&mut self, schema: Arc<dyn SchemaNode>) {
        self.includes.push(schema);
    }

    pub fn exclude(&mut self, schema: Arc<dyn SchemaNode>) {
        self.excludes.push(schema);
    }

    pub fn includes(&self) -> &[Arc<dyn SchemaNode>] {
        &self.includes
    }

    pub fn excludes(&self) -> &[Arc<dyn SchemaNode>] {
        &self.excludes
    }

    /// True when neither list constrains members.
    pub fn is_unrestricted(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    /// Human-readable summary of the allowed kinds, e.g. `number or string`.
    pub(crate) fn describe_includes(&self) -> String {
        let kinds: Vec<String> = self.includes.iter().map(|s| s.kind().to_string()).collect();
        kinds.join(" or ")
    }
}

impl fmt::Debug for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = |list: &[Arc<dyn SchemaNode>]| -> Vec<String> {
            list.iter().map(|s| s.kind().to_string()).collect()
        };
        f.debug_struct("Composition")
            .field("includes", &kinds(&self.includes))
            .field("excludes", &kinds(&self.excludes))
            .finish()
    }
}
