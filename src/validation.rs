//! Validation options and the context that carries them through a pass.
//!
//! [`Options`] is per-node configuration set with `.options(...)`.
//! [`ValidationContext`] carries the *effective* options from a parent node
//! down to its fields, elements and include/exclude candidates, so that an
//! enclosing object switched to `convert: false` also disables conversion
//! for everything nested inside it.

/// Per-node validation options.
///
/// # Example
///
/// ```rust
/// use conform::{Options, Schema, SchemaBuilder};
///
/// // Validate the raw input as given, with no string-to-array or
/// // string-to-number coercion anywhere below this object.
/// let schema = Schema::object()
///     .field("array", Schema::array())
///     .options(Options::strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Normalize loosely-typed input before structural checks.
    pub convert: bool,
}

impl Options {
    /// Options with conversion disabled.
    pub fn strict() -> Self {
        Self { convert: false }
    }

    pub fn with_convert(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self { convert: true }
    }
}

/// State inherited by a node from the node that invoked it.
///
/// A node's effective conversion flag is its own flag AND the inherited one;
/// the context passed on to sub-schemas carries that effective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    convert: bool,
}

impl ValidationContext {
    pub fn new(options: Options) -> Self {
        Self {
            convert: options.convert,
        }
    }

    /// Whether conversion is still permitted at this depth.
    pub fn convert(&self) -> bool {
        self.convert
    }

    /// Narrows this context with a node's own options.
    pub fn narrow(&self, options: Options) -> Self {
        Self {
            convert: self.convert && options.convert,
        }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
