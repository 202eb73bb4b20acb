//! mta-shapley - Exact Shapley-value attribution
//!
//! Treats attribution as a cooperative game. Touchpoints are players and a
//! coalition is worth the value of the conversion events it fully covers
//! ([`coalition_value`]). [`ShapleyEngine`] computes each touchpoint's exact
//! Shapley value by walking every coalition of the other touchpoints;
//! [`SampledShapley`] is the separate approximate mode for universes too
//! large to enumerate.

pub mod coalition;
pub mod config;
pub mod engine;
pub mod error;
pub mod powerset;
pub mod sampling;

pub use coalition::{coalition_from_mask, coalition_value};
pub use config::{EngineConfig, MAX_SUPPORTED_TOUCHPOINTS, SamplingConfig};
pub use engine::{ShapleyEngine, factorial, shapley_value, shapley_weight};
pub use error::{Result, ShapleyError};
pub use powerset::{PowerSet, power_set_indices, subset_count, subset_indices};
pub use sampling::{SampledShapley, ShapleyEstimate};
