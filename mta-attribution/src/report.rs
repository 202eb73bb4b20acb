//! Attribution reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mta_core::{Touchpoint, Value, value};

use crate::error::{AttributionError, Result};
use crate::model::AttributionModel;

/// Credit assigned to one touchpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchpointCredit {
    pub touchpoint: Touchpoint,
    #[serde(with = "mta_core::value::serde_value")]
    pub value: Value,
}

/// Touchpoint that could not be credited, and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTouchpoint {
    pub touchpoint: Touchpoint,
    pub reason: String,
}

/// Per-touchpoint credits of one model over one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionReport {
    pub model: AttributionModel,
    pub generated_at: DateTime<Utc>,
    /// Summed value of every event in the batch
    #[serde(with = "mta_core::value::serde_value")]
    pub total_value: Value,
    pub credits: Vec<TouchpointCredit>,
    pub skipped: Vec<SkippedTouchpoint>,
}

impl AttributionReport {
    /// Credit of `touchpoint`, if it was computed
    pub fn credit_for(&self, touchpoint: &Touchpoint) -> Option<&Value> {
        self.credits
            .iter()
            .find(|credit| &credit.touchpoint == touchpoint)
            .map(|credit| &credit.value)
    }

    /// Sum of all computed credits
    pub fn credited_total(&self) -> Value {
        self.credits
            .iter()
            .fold(value::zero(), |total, credit| total + &credit.value)
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AttributionError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mta_core::value::from_integer;

    fn report() -> AttributionReport {
        AttributionReport {
            model: AttributionModel::Linear,
            generated_at: Utc::now(),
            total_value: from_integer(300),
            credits: vec![
                TouchpointCredit {
                    touchpoint: Touchpoint::from("a"),
                    value: from_integer(200),
                },
                TouchpointCredit {
                    touchpoint: Touchpoint::from("b"),
                    value: from_integer(100),
                },
            ],
            skipped: vec![SkippedTouchpoint {
                touchpoint: Touchpoint::from("z"),
                reason: "Unknown touchpoint: z".into(),
            }],
        }
    }

    #[test]
    fn test_credit_lookup() {
        let report = report();
        assert_eq!(report.credit_for(&Touchpoint::from("a")), Some(&from_integer(200)));
        assert_eq!(report.credit_for(&Touchpoint::from("z")), None);
        assert_eq!(report.credited_total(), from_integer(300));
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = report();
        let json = report.to_json().unwrap();
        assert!(json.contains(r#""model": "linear""#));
        assert!(json.contains(r#""value": "200""#));

        let parsed: AttributionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.credits, report.credits);
        assert_eq!(parsed.skipped, report.skipped);
        assert_eq!(parsed.generated_at, report.generated_at);
    }
}
