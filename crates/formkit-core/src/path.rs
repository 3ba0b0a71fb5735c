//! Dotted field paths.
//!
//! A path names one position in the schema tree: `address.city`, or
//! `tags.2` for the third element of a list field. Paths are used verbatim as
//! HTML input names, so the browser posts them back unchanged.
//!
//! Splitting never fails. An empty segment (`a..b`, a leading or trailing
//! dot) is a literal empty-string key.

use std::fmt;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    /// The empty prefix that top-level keys are joined onto.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Path of a named member below this one.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_owned())
        } else {
            Self(format!("{}{SEPARATOR}{key}", self.0))
        }
    }

    /// Path of a list element below this one.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments of this path, in order. Always yields at least one segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        split(&self.0)
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Split raw path text into segments.
pub fn split(path: &str) -> std::str::Split<'_, char> {
    path.split(SEPARATOR)
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn child_of_root_has_no_leading_separator() {
        let path = FieldPath::root().child("user");
        assert_eq!(path.as_str(), "user");
        assert!(!path.is_root());
    }

    #[test]
    fn nested_children_and_indices() {
        let path = FieldPath::root().child("user").child("tags").index(2);
        assert_eq!(path.to_string(), "user.tags.2");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["user", "tags", "2"]);
    }

    #[test]
    fn empty_segments_are_kept() {
        let path = FieldPath::from("a..b.");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "", "b", ""]);
        assert_eq!(FieldPath::root().segments().collect::<Vec<_>>(), vec![""]);
    }
}
