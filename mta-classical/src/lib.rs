//! mta-classical - Heuristic attribution models
//!
//! First-touch, last-touch, linear and repeated-linear credit, plus the
//! path transition matrix used for removal-effect style analysis. All
//! results are exact [`Value`](mta_core::Value)s, comparable with the
//! Shapley engine.

pub mod heuristics;
pub mod transition;

pub use heuristics::{first_touch_value, last_touch_value, linear_value, repeated_linear_value};
pub use transition::{TransitionMatrix, transition_matrix};
