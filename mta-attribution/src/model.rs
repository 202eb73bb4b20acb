//! Attribution model selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AttributionError;

/// Attribution model used to credit touchpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionModel {
    /// All value to the first touchpoint of each path
    FirstTouch,
    /// All value to the last touchpoint of each path
    LastTouch,
    /// Equal shares per distinct touchpoint of each event
    Linear,
    /// Shares proportional to occurrences on each path
    RepeatedLinear,
    /// Exact Shapley value over all coalitions
    Shapley,
    /// Shapley value estimated from random orderings
    SampledShapley,
}

impl AttributionModel {
    /// Every model, in declaration order
    pub const ALL: [AttributionModel; 6] = [
        Self::FirstTouch,
        Self::LastTouch,
        Self::Linear,
        Self::RepeatedLinear,
        Self::Shapley,
        Self::SampledShapley,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTouch => "first_touch",
            Self::LastTouch => "last_touch",
            Self::Linear => "linear",
            Self::RepeatedLinear => "repeated_linear",
            Self::Shapley => "shapley",
            Self::SampledShapley => "sampled_shapley",
        }
    }

    /// Whether the model reads path order rather than touchpoint sets
    pub fn needs_order(&self) -> bool {
        matches!(
            self,
            Self::FirstTouch | Self::LastTouch | Self::RepeatedLinear
        )
    }
}

impl fmt::Display for AttributionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributionModel {
    type Err = AttributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| AttributionError::UnknownModel(s.to_string()))
    }
}
