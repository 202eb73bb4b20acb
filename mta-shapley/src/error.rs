//! Error types for mta-shapley

use mta_core::Touchpoint;
use thiserror::Error;

/// Error type for Shapley computations
///
/// All variants are configuration or invariant failures. Degenerate input
/// (no events, touchpoints that never change a coalition) is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapleyError {
    /// Target touchpoint does not occur in any event
    #[error("Unknown touchpoint: {0}")]
    UnknownTouchpoint(Touchpoint),

    /// A coalition built without the target already contained it
    #[error("Coalition already contains target touchpoint {0}")]
    CoalitionInvariant(Touchpoint),

    /// Exact enumeration refused because the universe is too large
    #[error("Universe of {count} touchpoints exceeds the exact enumeration limit of {limit}")]
    TooManyTouchpoints { count: usize, limit: usize },

    /// Sampling parameters cannot produce an estimate
    #[error("Invalid sampling configuration: {0}")]
    InvalidSampling(String),
}

/// Result type alias for Shapley computations
pub type Result<T> = std::result::Result<T, ShapleyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_touchpoint_display() {
        let err = ShapleyError::UnknownTouchpoint(Touchpoint::from("tv"));
        assert_eq!(err.to_string(), "Unknown touchpoint: tv");
    }

    #[test]
    fn test_too_many_touchpoints_display() {
        let err = ShapleyError::TooManyTouchpoints {
            count: 30,
            limit: 24,
        };
        assert!(err.to_string().contains("30"));
        assert!(err.to_string().contains("24"));
    }
}
