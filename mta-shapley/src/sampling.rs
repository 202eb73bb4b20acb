//! Permutation-sampling Shapley estimator
//!
//! An approximate mode for universes too large to enumerate. Each sample
//! draws a uniformly random ordering of the universe and records the target's
//! marginal contribution to the touchpoints placed before it; the estimate is
//! the mean over all samples. Averaging is exact; only the choice of
//! orderings is random.

use num_bigint::BigInt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use mta_core::{ContributionSet, Touchpoint, TouchpointSet, Value, all_touchpoints, value};

use crate::coalition::coalition_value;
use crate::config::SamplingConfig;
use crate::error::{Result, ShapleyError};

/// Result of a sampled Shapley estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapleyEstimate {
    /// Mean marginal contribution over the sampled orderings
    #[serde(with = "mta_core::value::serde_value")]
    pub value: Value,
    /// Number of orderings sampled
    pub permutations: usize,
}

/// Shapley estimator over random orderings of the universe
pub struct SampledShapley {
    config: SamplingConfig,
}

impl SampledShapley {
    /// Create with default configuration
    pub fn new() -> Self {
        Self {
            config: SamplingConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(config: SamplingConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Estimate the Shapley value of `touchpoint` over `events`
    #[instrument(
        name = "shapley::sampled",
        skip_all,
        fields(touchpoint = %touchpoint, permutations = self.config.permutations)
    )]
    pub fn estimate(
        &self,
        touchpoint: &Touchpoint,
        events: &[ContributionSet],
    ) -> Result<ShapleyEstimate> {
        let permutations = self.config.permutations;
        if permutations == 0 {
            return Err(ShapleyError::InvalidSampling(
                "at least one permutation is required".into(),
            ));
        }

        let mut order = all_touchpoints(events);
        if !order.contains(touchpoint) {
            return Err(ShapleyError::UnknownTouchpoint(touchpoint.clone()));
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut total = value::zero();
        for _ in 0..permutations {
            order.shuffle(&mut rng);
            total += marginal_after_predecessors(touchpoint, &order, events);
        }

        let value = total / Value::from_integer(BigInt::from(permutations));
        debug!(universe = order.len(), "Sampled Shapley estimate complete");

        Ok(ShapleyEstimate {
            value,
            permutations,
        })
    }
}

impl Default for SampledShapley {
    fn default() -> Self {
        Self::new()
    }
}

/// Marginal contribution of `target` to the touchpoints ahead of it in `order`
fn marginal_after_predecessors(
    target: &Touchpoint,
    order: &[Touchpoint],
    events: &[ContributionSet],
) -> Value {
    let mut coalition: TouchpointSet = order.iter().take_while(|t| *t != target).collect();
    let without = coalition_value(&coalition, events);
    coalition.insert(target.clone());
    coalition_value(&coalition, events) - without
}
