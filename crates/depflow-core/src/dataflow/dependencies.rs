//! Dependency state for a single program point

use super::depend_set::DependSet;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Maps each variable to the names of the variables it depends on.
///
/// Keys are kept sorted so rendering is deterministic. A missing key and a
/// key mapped to an empty set mean the same thing to the analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dependencies {
    vars: BTreeMap<String, DependSet>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: &str) -> Option<&DependSet> {
        self.vars.get(var)
    }

    /// Dependency set of `var`, treating an absent entry as empty
    pub fn get_or_empty(&self, var: &str) -> DependSet {
        self.vars.get(var).cloned().unwrap_or_default()
    }

    /// Insert or overwrite the dependency set of `var`
    pub fn put(&mut self, var: impl Into<String>, deps: DependSet) -> &mut Self {
        self.vars.insert(var.into(), deps);
        self
    }

    /// Deep copy; every set is cloned independently
    pub fn copy(&self) -> Dependencies {
        self.clone()
    }

    /// Key-wise union of two states (join at control-flow merge points)
    pub fn merge(&self, other: &Dependencies) -> Dependencies {
        let mut result = self.clone();
        result.merge_in_place(other);
        result
    }

    pub fn merge_in_place(&mut self, other: &Dependencies) {
        for (var, deps) in &other.vars {
            self.vars.entry(var.clone()).or_default().merge(deps);
        }
    }

    /// Equality of the full mapping, with absent keys read as empty sets
    pub fn equals(&self, other: &Dependencies) -> bool {
        self.non_empty().eq(other.non_empty())
    }

    fn non_empty(&self) -> impl Iterator<Item = (&String, &DependSet)> {
        self.vars.iter().filter(|(_, deps)| !deps.is_empty())
    }

    /// Every variable whose dependency set contains `var`, in key order
    pub fn keys_depending_on(&self, var: &str) -> Vec<String> {
        self.vars
            .iter()
            .filter(|(_, deps)| deps.contains(var))
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn contains_key(&self, var: &str) -> bool {
        self.vars.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, DependSet> {
        self.vars.iter()
    }

    /// `true` if every set here is contained in the matching set of `other`
    pub fn is_subset_of(&self, other: &Dependencies) -> bool {
        self.vars
            .iter()
            .all(|(var, deps)| deps.is_empty() || other.get(var).is_some_and(|o| deps.is_subset(o)))
    }
}

impl PartialEq for Dependencies {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Dependencies {}

impl<K: Into<String>> FromIterator<(K, DependSet)> for Dependencies {
    fn from_iter<I: IntoIterator<Item = (K, DependSet)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dependencies {
    type Item = (&'a String, &'a DependSet);
    type IntoIter = btree_map::Iter<'a, String, DependSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

/// Renders as `{ (x,[a, b]), (y,[c]) }`, omitting variables with no dependencies
impl fmt::Display for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut sep = " ";
        for (var, deps) in self.non_empty() {
            write!(f, "{sep}({var},{deps})")?;
            sep = ", ";
        }
        f.write_str(" }")
    }
}
