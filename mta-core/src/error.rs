//! Error types for mta-core

use thiserror::Error;

/// Error type for data-model operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value could not be parsed from its textual form
    #[error("Invalid value '{input}': {reason}")]
    InvalidValue { input: String, reason: String },

    /// A floating point value has no exact rational form
    #[error("Non-finite value: {0}")]
    NonFinite(f64),

    /// A ratio had a zero denominator
    #[error("Zero denominator in value '{0}'")]
    ZeroDenominator(String),
}

/// Result type alias for data-model operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidValue {
            input: "abc".into(),
            reason: "not a number".into(),
        };
        assert_eq!(err.to_string(), "Invalid value 'abc': not a number");
    }

    #[test]
    fn test_non_finite_display() {
        let err = CoreError::NonFinite(f64::INFINITY);
        assert!(err.to_string().contains("inf"));
    }
}
