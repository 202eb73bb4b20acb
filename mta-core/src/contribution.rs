//! Conversion events
//!
//! A conversion event comes in two shapes. [`Contribution`] keeps the path:
//! touchpoints in the order they were encountered, repeats included.
//! [`ContributionSet`] keeps only which touchpoints took part. The projection
//! from the first to the second is lossy and one-directional.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::touchpoint::{Touchpoint, TouchpointSet, write_touchpoints};
use crate::value::{self, Value};

/// An ordered path of touchpoints together with their combined value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    touchpoints: Vec<Touchpoint>,
    #[serde(with = "crate::value::serde_value")]
    value: Value,
}

impl Contribution {
    pub fn new(touchpoints: Vec<Touchpoint>, value: Value) -> Self {
        Self { touchpoints, value }
    }

    /// Touchpoints in path order, repeats included
    pub fn touchpoints(&self) -> &[Touchpoint] {
        &self.touchpoints
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.touchpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touchpoints.is_empty()
    }

    pub fn first(&self) -> Option<&Touchpoint> {
        self.touchpoints.first()
    }

    pub fn last(&self) -> Option<&Touchpoint> {
        self.touchpoints.last()
    }

    /// Number of times `touchpoint` occurs on the path
    pub fn occurrences(&self, touchpoint: &Touchpoint) -> usize {
        self.touchpoints.iter().filter(|t| *t == touchpoint).count()
    }

    /// Drop order and repetition, keeping the value
    pub fn to_set(&self) -> ContributionSet {
        ContributionSet {
            touchpoints: self.touchpoints.iter().collect(),
            value: self.value.clone(),
        }
    }
}

impl From<&Contribution> for ContributionSet {
    fn from(contribution: &Contribution) -> Self {
        contribution.to_set()
    }
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_touchpoints(f, self.touchpoints.iter())?;
        write!(f, " {}}}", self.value)
    }
}

/// An unordered set of touchpoints together with their combined value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSet {
    touchpoints: TouchpointSet,
    #[serde(with = "crate::value::serde_value")]
    value: Value,
}

impl ContributionSet {
    pub fn new(touchpoints: TouchpointSet, value: Value) -> Self {
        Self { touchpoints, value }
    }

    pub fn touchpoints(&self) -> &TouchpointSet {
        &self.touchpoints
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn contains(&self, touchpoint: &Touchpoint) -> bool {
        self.touchpoints.contains(touchpoint)
    }
}

impl fmt::Display for ContributionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {}}}", self.touchpoints, self.value)
    }
}

/// Project every ordered contribution onto its set form
pub fn to_sets(contributions: &[Contribution]) -> Vec<ContributionSet> {
    contributions.iter().map(Contribution::to_set).collect()
}

/// All touchpoints encountered in `contributions`, without repetition
///
/// Touchpoints appear in the order they are first seen while scanning the
/// events; within one event they are visited in name order.
pub fn all_touchpoints(contributions: &[ContributionSet]) -> Vec<Touchpoint> {
    let mut seen = HashSet::new();
    let mut touchpoints = Vec::new();

    for contribution in contributions {
        for touchpoint in contribution.touchpoints() {
            if seen.insert(touchpoint) {
                touchpoints.push(touchpoint.clone());
            }
        }
    }

    touchpoints
}

/// Summed value over all contributions
pub fn total_value(contributions: &[ContributionSet]) -> Value {
    contributions
        .iter()
        .fold(value::zero(), |total, contribution| {
            total + contribution.value()
        })
}
