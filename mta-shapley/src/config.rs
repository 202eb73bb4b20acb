//! Configuration for the Shapley engine and the sampling estimator

use serde::{Deserialize, Serialize};

use crate::powerset::MAX_POWER_SET_SIZE;

/// Hard ceiling on the universe size for exact enumeration
///
/// The coalition walk indexes subsets of the other touchpoints with a `u64`
/// bit mask.
pub const MAX_SUPPORTED_TOUCHPOINTS: usize = MAX_POWER_SET_SIZE + 1;

/// Configuration for exact Shapley enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest universe the exact engine will enumerate (default: 24)
    ///
    /// Work doubles with every touchpoint; 24 touchpoints already means
    /// 8M coalitions per target.
    pub max_touchpoints: usize,
    /// Split the coalition walk across the rayon pool (default: true)
    pub parallel: bool,
    /// Minimum number of non-target touchpoints before splitting (default: 12)
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_touchpoints: 24,
            parallel: true,
            parallel_threshold: 12,
        }
    }
}

impl EngineConfig {
    /// Effective limit after applying the hard ceiling
    pub fn touchpoint_limit(&self) -> usize {
        self.max_touchpoints.min(MAX_SUPPORTED_TOUCHPOINTS)
    }

    /// Whether a walk over `others` non-target touchpoints runs in parallel
    pub fn runs_parallel(&self, others: usize) -> bool {
        self.parallel && others >= self.parallel_threshold
    }
}

/// Configuration for the permutation-sampling estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of random permutations to average over (default: 1000)
    pub permutations: usize,
    /// RNG seed; `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            permutations: 1000,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_touchpoints, 24);
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 12);
    }

    #[test]
    fn test_touchpoint_limit_is_capped() {
        let config = EngineConfig {
            max_touchpoints: 1000,
            ..Default::default()
        };
        assert_eq!(config.touchpoint_limit(), MAX_SUPPORTED_TOUCHPOINTS);
    }

    #[test]
    fn test_runs_parallel() {
        let config = EngineConfig::default();
        assert!(!config.runs_parallel(11));
        assert!(config.runs_parallel(12));

        let sequential = EngineConfig {
            parallel: false,
            ..Default::default()
        };
        assert!(!sequential.runs_parallel(40));
    }

    #[test]
    fn test_engine_config_partial_toml() {
        let config: EngineConfig = toml::from_str("max_touchpoints = 16").unwrap();
        assert_eq!(config.max_touchpoints, 16);
        assert!(config.parallel);
    }

    #[test]
    fn test_sampling_config_serialization() {
        let config = SamplingConfig {
            permutations: 250,
            seed: Some(7),
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: SamplingConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
