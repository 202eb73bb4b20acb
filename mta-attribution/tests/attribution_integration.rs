//! End-to-end attribution from JSON paths

use mta_attribution::{
    AttributionConfig, AttributionModel, AttributionReport, Attributor, EventBatch, Touchpoint,
    transition_matrix,
};
use mta_core::value::from_integer;
use tempfile::TempDir;

const PATHS: &str = r#"[
    {"touchpoints": ["search"], "value": 100},
    {"touchpoints": ["search", "email"], "value": 200},
    {"touchpoints": ["search", "display"], "value": 300},
    {"touchpoints": [], "value": 50}
]"#;

fn batch() -> EventBatch {
    EventBatch::from_json(PATHS).unwrap()
}

fn credit(report: &AttributionReport, name: &str) -> mta_core::Value {
    report.credit_for(&Touchpoint::from(name)).cloned().unwrap()
}

#[test]
fn test_every_model_reports_every_touchpoint() {
    let attributor = Attributor::new();
    let batch = batch();

    for model in AttributionModel::ALL {
        let report = attributor.report(model, &batch).unwrap();
        assert_eq!(report.model, model);
        assert_eq!(report.credits.len(), 3, "{model}");
        assert!(report.is_complete(), "{model}");
        assert_eq!(report.total_value, from_integer(650));
    }
}

#[test]
fn test_exact_shapley_credits() {
    let report = Attributor::new()
        .report(AttributionModel::Shapley, &batch())
        .unwrap();

    assert_eq!(credit(&report, "search"), from_integer(350));
    assert_eq!(credit(&report, "email"), from_integer(100));
    assert_eq!(credit(&report, "display"), from_integer(150));
    // The empty path is worth the same to every coalition
    assert_eq!(report.credited_total(), from_integer(600));
}

#[test]
fn test_heuristic_credits_cover_touchpoint_paths() {
    let attributor = Attributor::new();
    let batch = batch();

    for model in [
        AttributionModel::FirstTouch,
        AttributionModel::LastTouch,
        AttributionModel::Linear,
        AttributionModel::RepeatedLinear,
    ] {
        let report = attributor.report(model, &batch).unwrap();
        assert_eq!(report.credited_total(), from_integer(600), "{model}");
    }
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let mut config = AttributionConfig::default();
    config.sampling.seed = Some(11);
    config.sampling.permutations = 200;
    config.parallel_touchpoints = false;

    let first = Attributor::with_config(config.clone())
        .report(AttributionModel::SampledShapley, &batch())
        .unwrap();
    let second = Attributor::with_config(config)
        .report(AttributionModel::SampledShapley, &batch())
        .unwrap();

    assert_eq!(first.credits, second.credits);
}

#[test]
fn test_unknown_touchpoints_are_skipped() {
    let touchpoints = vec![Touchpoint::from("tv"), Touchpoint::from("email")];
    let report = Attributor::new()
        .report_for(AttributionModel::Shapley, &touchpoints, &batch())
        .unwrap();

    assert_eq!(report.credits.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].touchpoint, Touchpoint::from("tv"));
}

#[test]
fn test_config_from_file_drives_attributor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("attribution.toml");
    std::fs::write(
        &path,
        r#"
        parallel_touchpoints = false

        [engine]
        max_touchpoints = 2
        "#,
    )
    .unwrap();

    let config = AttributionConfig::load(&path).unwrap();
    let report = Attributor::with_config(config)
        .report(AttributionModel::Shapley, &batch())
        .unwrap();

    assert!(report.credits.is_empty());
    assert_eq!(report.skipped.len(), 3);
    assert!(report.skipped[0].reason.contains("exceeds"));
}

#[test]
fn test_report_json_output() {
    let report = Attributor::new()
        .report(AttributionModel::Linear, &batch())
        .unwrap();
    let json = report.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["model"], "linear");
    assert_eq!(parsed["total_value"], "650");
    assert_eq!(parsed["credits"][0]["touchpoint"], "search");
    assert_eq!(parsed["credits"][0]["value"], "350");
}

#[test]
fn test_transition_matrix_from_batch() {
    let batch = batch();
    let matrix = transition_matrix(batch.paths().unwrap());
    assert_eq!(matrix.size(), 3);
    assert!(matrix.is_row_stochastic());
}
