//! Event batches
//!
//! A batch holds the conversion events of one attribution run. Built from
//! ordered paths it serves every model; built from touchpoint sets alone it
//! serves only the models that ignore order.

use mta_core::{Contribution, ContributionSet, Touchpoint, Value, all_touchpoints, to_sets, total_value};
use serde::Deserialize;

use crate::error::{AttributionError, Result};

/// In-memory conversion events for an attribution run
#[derive(Debug, Clone)]
pub struct EventBatch {
    paths: Option<Vec<Contribution>>,
    sets: Vec<ContributionSet>,
}

impl EventBatch {
    /// Batch of ordered paths; the set projection is derived once
    pub fn from_paths(paths: Vec<Contribution>) -> Self {
        let sets = to_sets(&paths);
        Self {
            paths: Some(paths),
            sets,
        }
    }

    /// Batch of unordered events
    pub fn from_sets(sets: Vec<ContributionSet>) -> Self {
        Self { paths: None, sets }
    }

    /// Parse a JSON array of ordered paths
    ///
    /// Each element is `{"touchpoints": [...], "value": ...}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let paths = parse_json::<Vec<Contribution>>(json)?;
        Ok(Self::from_paths(paths))
    }

    /// Parse a JSON array of unordered events
    pub fn sets_from_json(json: &str) -> Result<Self> {
        let sets = parse_json::<Vec<ContributionSet>>(json)?;
        Ok(Self::from_sets(sets))
    }

    /// Ordered paths, if the batch was built from them
    pub fn paths(&self) -> Option<&[Contribution]> {
        self.paths.as_deref()
    }

    pub fn sets(&self) -> &[ContributionSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Distinct touchpoints in first-seen order
    pub fn touchpoints(&self) -> Vec<Touchpoint> {
        all_touchpoints(&self.sets)
    }

    /// Summed value of every event
    pub fn total_value(&self) -> Value {
        total_value(&self.sets)
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| AttributionError::Serialization(e.to_string()))
}
