//! Set of variable names a value may have been influenced by

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Ordered, duplicate-free set of variable names.
///
/// An empty set means no dependency is known for the variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependSet {
    vars: BTreeSet<String>,
}

impl DependSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(var: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.insert(var);
        set
    }

    /// Returns `true` if the name was not already present
    pub fn insert(&mut self, var: impl Into<String>) -> bool {
        self.vars.insert(var.into())
    }

    /// Union `other` into this set
    pub fn merge(&mut self, other: &DependSet) -> &mut Self {
        self.vars.extend(other.vars.iter().cloned());
        self
    }

    pub fn union(&self, other: &DependSet) -> DependSet {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    pub fn copy(&self) -> DependSet {
        self.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn contains(&self, var: &str) -> bool {
        self.vars.contains(var)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_subset(&self, other: &DependSet) -> bool {
        self.vars.is_subset(&other.vars)
    }

    /// Names in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DependSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for DependSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.vars.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a DependSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

/// Renders as `[a, b, c]`
impl fmt::Display for DependSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, var) in self.vars.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(var)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_singleton() {
        assert!(DependSet::new().is_empty());

        let set = DependSet::singleton("x");
        assert!(!set.is_empty());
        assert!(set.contains("x"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_merge_is_union() {
        let mut left: DependSet = ["a", "b"].into_iter().collect();
        let right: DependSet = ["b", "c"].into_iter().collect();

        left.merge(&right);

        assert_eq!(left.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        // merge leaves the argument untouched
        assert_eq!(right.len(), 2);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = DependSet::singleton("a");
        let mut copy = original.copy();
        copy.insert("b");

        assert_eq!(original.len(), 1);
        assert!(!original.contains("b"));
    }

    #[test]
    fn test_display_sorted() {
        let set: DependSet = ["z", "a", "m"].into_iter().collect();
        assert_eq!(set.to_string(), "[a, m, z]");
        assert_eq!(DependSet::new().to_string(), "[]");
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut set = DependSet::new();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_json_is_plain_array() {
        let set: DependSet = ["b", "a"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }
}
