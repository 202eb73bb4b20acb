//! Touchpoints and touchpoint sets
//!
//! A touchpoint is a named marketing contact (a channel, a campaign, an
//! email). Identity is the name: two touchpoints with equal names are the
//! same player in every model.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A contributing entity in a conversion event
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Touchpoint {
    name: String,
}

impl Touchpoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Touchpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Touchpoint {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Touchpoint {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Unordered set of touchpoints without repetition
///
/// Used both for the touchpoints of a [`ContributionSet`](crate::ContributionSet)
/// and for coalitions in the Shapley game. Iteration is ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchpointSet {
    members: BTreeSet<Touchpoint>,
}

impl TouchpointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a touchpoint, returning false if it was already present
    pub fn insert(&mut self, touchpoint: Touchpoint) -> bool {
        self.members.insert(touchpoint)
    }

    pub fn remove(&mut self, touchpoint: &Touchpoint) -> bool {
        self.members.remove(touchpoint)
    }

    pub fn contains(&self, touchpoint: &Touchpoint) -> bool {
        self.members.contains(touchpoint)
    }

    /// True when every member of `self` is also a member of `other`
    pub fn is_subset(&self, other: &TouchpointSet) -> bool {
        self.members.is_subset(&other.members)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Touchpoint> {
        self.members.iter()
    }
}

impl FromIterator<Touchpoint> for TouchpointSet {
    fn from_iter<I: IntoIterator<Item = Touchpoint>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a Touchpoint> for TouchpointSet {
    fn from_iter<I: IntoIterator<Item = &'a Touchpoint>>(iter: I) -> Self {
        iter.into_iter().cloned().collect()
    }
}

impl Extend<Touchpoint> for TouchpointSet {
    fn extend<I: IntoIterator<Item = Touchpoint>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl IntoIterator for TouchpointSet {
    type Item = Touchpoint;
    type IntoIter = btree_set::IntoIter<Touchpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a TouchpointSet {
    type Item = &'a Touchpoint;
    type IntoIter = btree_set::Iter<'a, Touchpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl fmt::Display for TouchpointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_touchpoints(f, self.iter())
    }
}

/// Write touchpoints as `[{a} {b}]`
pub(crate) fn write_touchpoints<'a>(
    f: &mut fmt::Formatter<'_>,
    touchpoints: impl Iterator<Item = &'a Touchpoint>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, touchpoint) in touchpoints.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{{{touchpoint}}}")?;
    }
    f.write_str("]")
}
