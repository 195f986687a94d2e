//! Hierarchical category paths
//!
//! A category is an ordered sequence of segments, written externally as a
//! dot-joined string (`"community.brush"`). Parsing never fails: any string is
//! split on `.`. Paths with empty segments are malformed and are rejected by
//! the manager when they are used.

use crate::plugin::error::{RegistryError, RegistryResult};
use std::fmt;

/// One category path, e.g. `["community", "brush"]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    /// Split a dot-separated string into a path
    pub fn parse(text: &str) -> Self {
        Self(text.split('.').map(str::to_string).collect())
    }

    /// Build a path from already separated segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path formed by `start..end` of this path's segments
    pub fn slice(&self, start: usize, end: usize) -> CategoryPath {
        CategoryPath(self.0[start..end].to_vec())
    }

    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|s| !s.is_empty())
    }

    /// Reject paths with empty segments (`"a..b"`, `".a"`, `""`)
    pub fn validate(&self) -> RegistryResult<()> {
        if self.is_well_formed() {
            Ok(())
        } else {
            Err(RegistryError::MalformedCategory {
                category: self.to_string(),
            })
        }
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&str> for CategoryPath {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for CategoryPath {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<&String> for CategoryPath {
    fn from(text: &String) -> Self {
        Self::parse(text)
    }
}

/// A category argument: one path or an ordered list of paths
///
/// `"a.b"`, `["a", "b"]` and `["a.b"]` are all accepted and are the same
/// query: matching only ever sees the flattened segment sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySpec(Vec<CategoryPath>);

impl CategorySpec {
    /// A spec with no categories
    pub fn none() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[CategoryPath] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> RegistryResult<()> {
        self.0.iter().try_for_each(CategoryPath::validate)
    }

    /// Every segment of every path, in order
    pub fn flatten(&self) -> CategoryPath {
        CategoryPath::from_segments(self.0.iter().flat_map(|p| p.segments().iter().cloned()))
    }
}

impl fmt::Display for CategorySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}

impl From<CategoryPath> for CategorySpec {
    fn from(path: CategoryPath) -> Self {
        Self(vec![path])
    }
}

impl From<&str> for CategorySpec {
    fn from(text: &str) -> Self {
        Self(vec![CategoryPath::parse(text)])
    }
}

impl From<String> for CategorySpec {
    fn from(text: String) -> Self {
        Self(vec![CategoryPath::parse(&text)])
    }
}

impl From<Vec<CategoryPath>> for CategorySpec {
    fn from(paths: Vec<CategoryPath>) -> Self {
        Self(paths)
    }
}

impl From<Vec<&str>> for CategorySpec {
    fn from(items: Vec<&str>) -> Self {
        items.into_iter().collect()
    }
}

impl From<Vec<String>> for CategorySpec {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<&[&str]> for CategorySpec {
    fn from(items: &[&str]) -> Self {
        items.iter().copied().collect()
    }
}

impl From<&[String]> for CategorySpec {
    fn from(items: &[String]) -> Self {
        items.iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for CategorySpec {
    fn from(items: [&str; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Into<CategoryPath>> FromIterator<T> for CategorySpec {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
