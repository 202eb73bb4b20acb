//! mta-core - Data model for multi-touch attribution
//!
//! Touchpoints, conversion events in ordered and set form, and the exact
//! rational [`Value`] type shared by every attribution model.

pub mod contribution;
pub mod error;
pub mod touchpoint;
pub mod value;

pub use contribution::{Contribution, ContributionSet, all_touchpoints, to_sets, total_value};
pub use error::{CoreError, Result};
pub use touchpoint::{Touchpoint, TouchpointSet};
pub use value::{Value, parse_value};
