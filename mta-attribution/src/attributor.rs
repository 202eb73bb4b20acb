//! Batch attribution across models

use std::collections::HashSet;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use mta_classical::{first_touch_value, last_touch_value, linear_value, repeated_linear_value};
use mta_core::{Contribution, Touchpoint, Value};
use mta_shapley::{SampledShapley, ShapleyEngine, ShapleyError};

use crate::batch::EventBatch;
use crate::config::AttributionConfig;
use crate::error::{AttributionError, Result};
use crate::model::AttributionModel;
use crate::report::{AttributionReport, SkippedTouchpoint, TouchpointCredit};

/// Runs attribution models over event batches
pub struct Attributor {
    config: AttributionConfig,
    engine: ShapleyEngine,
    sampler: SampledShapley,
}

impl Attributor {
    /// Create with default configuration
    pub fn new() -> Self {
        Self::with_config(AttributionConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(config: AttributionConfig) -> Self {
        Self {
            engine: ShapleyEngine::with_config(config.engine.clone()),
            sampler: SampledShapley::with_config(config.sampling.clone()),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &AttributionConfig {
        &self.config
    }

    /// Credit of a single touchpoint under `model`
    ///
    /// Heuristic models give zero credit to a touchpoint absent from the
    /// batch; the Shapley models reject it with
    /// [`ShapleyError::UnknownTouchpoint`].
    pub fn value(
        &self,
        model: AttributionModel,
        touchpoint: &Touchpoint,
        batch: &EventBatch,
    ) -> Result<Value> {
        match model {
            AttributionModel::FirstTouch => {
                Ok(first_touch_value(touchpoint, ordered_paths(model, batch)?))
            }
            AttributionModel::LastTouch => {
                Ok(last_touch_value(touchpoint, ordered_paths(model, batch)?))
            }
            AttributionModel::RepeatedLinear => Ok(repeated_linear_value(
                touchpoint,
                ordered_paths(model, batch)?,
            )),
            AttributionModel::Linear => Ok(linear_value(touchpoint, batch.sets())),
            AttributionModel::Shapley => Ok(self.engine.shapley_value(touchpoint, batch.sets())?),
            AttributionModel::SampledShapley => {
                Ok(self.sampler.estimate(touchpoint, batch.sets())?.value)
            }
        }
    }

    /// Credit every touchpoint of the batch under `model`
    pub fn report(&self, model: AttributionModel, batch: &EventBatch) -> Result<AttributionReport> {
        let touchpoints = batch.touchpoints();
        self.report_for(model, &touchpoints, batch)
    }

    /// Credit the given touchpoints under `model`
    ///
    /// Credits keep the order of `touchpoints`. Under every model, a
    /// touchpoint that is not part of the batch is listed as skipped with
    /// [`AttributionError::UnknownTouchpoint`] as the reason. One whose Shapley
    /// walk is refused is skipped the same way. Neither fails the whole report.
    #[instrument(
        name = "attribution::report",
        skip_all,
        fields(model = %model, touchpoints = touchpoints.len(), events = batch.len())
    )]
    pub fn report_for(
        &self,
        model: AttributionModel,
        touchpoints: &[Touchpoint],
        batch: &EventBatch,
    ) -> Result<AttributionReport> {
        if model.needs_order() {
            ordered_paths(model, batch)?;
        }

        let universe: HashSet<Touchpoint> = batch.touchpoints().into_iter().collect();
        let credit = |touchpoint: &Touchpoint| -> Result<Value> {
            if !universe.contains(touchpoint) {
                return Err(AttributionError::UnknownTouchpoint(touchpoint.clone()));
            }
            self.value(model, touchpoint, batch)
        };

        let outcomes: Vec<(Touchpoint, Result<Value>)> = if self.config.parallel_touchpoints {
            touchpoints
                .par_iter()
                .map(|touchpoint| (touchpoint.clone(), credit(touchpoint)))
                .collect()
        } else {
            touchpoints
                .iter()
                .map(|touchpoint| (touchpoint.clone(), credit(touchpoint)))
                .collect()
        };

        let mut credits = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for (touchpoint, outcome) in outcomes {
            match outcome {
                Ok(value) => credits.push(TouchpointCredit { touchpoint, value }),
                Err(AttributionError::Shapley(e)) => {
                    warn!(touchpoint = %touchpoint, error = %e, "Skipping touchpoint");
                    skipped.push(SkippedTouchpoint {
                        touchpoint,
                        reason: e.to_string(),
                    });
                }
                Err(e @ AttributionError::UnknownTouchpoint(_)) => {
                    warn!(touchpoint = %touchpoint, "Skipping touchpoint absent from batch");
                    skipped.push(SkippedTouchpoint {
                        touchpoint,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        debug!(credited = credits.len(), skipped = skipped.len(), "Attribution finished");
        if !skipped.is_empty() {
            info!(skipped = skipped.len(), "Report is incomplete");
        }

        Ok(AttributionReport {
            model,
            generated_at: Utc::now(),
            total_value: batch.total_value(),
            credits,
            skipped,
        })
    }
}

impl Default for Attributor {
    fn default() -> Self {
        Self::new()
    }
}

fn ordered_paths(model: AttributionModel, batch: &EventBatch) -> Result<&[Contribution]> {
    batch
        .paths()
        .ok_or(AttributionError::OrderRequired(model))
}
