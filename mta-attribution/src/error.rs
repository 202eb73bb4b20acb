//! Error types for mta-attribution

use mta_core::{CoreError, Touchpoint};
use mta_shapley::ShapleyError;
use thiserror::Error;

use crate::model::AttributionModel;

/// Error type for attribution operations
#[derive(Debug, Error)]
pub enum AttributionError {
    /// Shapley computation failed
    #[error("Shapley error: {0}")]
    Shapley(#[from] ShapleyError),

    /// Event data could not be interpreted
    #[error("Data error: {0}")]
    Core(#[from] CoreError),

    /// Touchpoint does not occur in the batch
    #[error("Unknown touchpoint: {0}")]
    UnknownTouchpoint(Touchpoint),

    /// Model needs path order but only touchpoint sets were supplied
    #[error("Model {0} needs ordered paths")]
    OrderRequired(AttributionModel),

    /// Model name not recognized
    #[error("Unknown attribution model: {0}")]
    UnknownModel(String),

    /// Configuration could not be read or written
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization or deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for attribution operations
pub type Result<T> = std::result::Result<T, AttributionError>;
