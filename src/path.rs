//! Locations of values inside nested input.
//!
//! A [`JsonPath`] names where a schema node is being applied (`arr`,
//! `users[0].email`). Error records carry the path of the offending value and
//! messages embed the path of the node that rejected it.

use std::fmt::{self, Display};

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key, e.g. `arr`.
    Field(String),
    /// Array position, e.g. `[2]`.
    Index(usize),
}

/// A path to a value, built up one segment at a time during validation.
///
/// # Example
///
/// ```rust
/// use conform::JsonPath;
///
/// let path = JsonPath::root().push_field("users").push_index(0).push_field("email");
/// assert_eq!(path.to_string(), "users[0].email");
/// assert_eq!(JsonPath::root().describe(), "value");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The path of the value handed to `validate` directly.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `name` appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with `index` appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path the way error messages refer to a field.
    ///
    /// The root has no name of its own and is described as `value`.
    pub fn describe(&self) -> String {
        if self.is_root() {
            "value".to_string()
        } else {
            self.to_string()
        }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i > 0 => write!(f, ".{}", name)?,
                PathSegment::Field(name) => write!(f, "{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
