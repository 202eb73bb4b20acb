//! mta-attribution - Multi-touch attribution over conversion events
//!
//! Loads conversion paths into an [`EventBatch`] and credits each touchpoint
//! under an [`AttributionModel`]: first touch, last touch, linear,
//! repeated linear, exact Shapley or sampled Shapley. [`Attributor`] runs a
//! model across the whole batch and produces an [`AttributionReport`].
//!
//! ```no_run
//! use mta_attribution::{AttributionModel, Attributor, EventBatch};
//!
//! let batch = EventBatch::from_json(r#"[{"touchpoints": ["search", "email"], "value": 120}]"#)?;
//! let report = Attributor::new().report(AttributionModel::Shapley, &batch)?;
//! println!("{}", report.to_json()?);
//! # Ok::<(), mta_attribution::AttributionError>(())
//! ```

pub mod attributor;
pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod report;

pub use attributor::Attributor;
pub use batch::EventBatch;
pub use config::AttributionConfig;
pub use error::{AttributionError, Result};
pub use model::AttributionModel;
pub use report::{AttributionReport, SkippedTouchpoint, TouchpointCredit};

pub use mta_classical::{TransitionMatrix, transition_matrix};
pub use mta_core::{Contribution, ContributionSet, Touchpoint, TouchpointSet, Value};
pub use mta_shapley::{
    EngineConfig, SampledShapley, SamplingConfig, ShapleyEngine, ShapleyEstimate,
};
