//! Property and scenario tests for the risk pipeline.
//!
//! These exercise the public API end to end and check the invariants that
//! must hold for every dataset and quasi-identifier selection.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use riskscope_core::risk::{
    EquivalenceClasses, MAX_OVERALL_RISK, NO_DATA_RECOMMENDATION, RiskAnalyzer, RiskConfig,
};
use riskscope_core::{Dataset, Value};

const HEADERS: [&str; 4] = ["Age", "Gender", "District", "Occupation"];

fn headers() -> Vec<String> {
    HEADERS.iter().map(|s| s.to_string()).collect()
}

/// Small value domains so that equivalence classes of every size appear.
fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => (20_i64..24).prop_map(Value::from),
        3 => prop::sample::select(vec!["F", "M", "Pune", "Delhi", "a|b", ""]).prop_map(Value::from),
        1 => Just(Value::Missing),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(prop::collection::vec(cell(), HEADERS.len()), 0..60)
        .prop_map(|records| Dataset::from_records(headers(), records).expect("valid records"))
}

fn selection_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(headers(), 0..=HEADERS.len())
}

proptest! {
    #[test]
    fn class_sizes_sum_to_row_count(data in dataset_strategy(), qi in selection_strategy()) {
        let classes = EquivalenceClasses::build(&data, &qi).unwrap();
        prop_assert_eq!(classes.total_records(), data.len());
    }

    #[test]
    fn metrics_invariants_hold(
        data in dataset_strategy(),
        qi in selection_strategy(),
        threshold in 1_usize..8,
    ) {
        let analyzer = RiskAnalyzer::new(RiskConfig::new().with_risk_threshold(threshold)).unwrap();
        let metrics = analyzer.analyze(&data, &qi).unwrap();
        let classes = EquivalenceClasses::build(&data, &qi).unwrap();

        prop_assert_eq!(metrics.k_anonymity, classes.sizes().min().unwrap_or(0));
        if metrics.k_anonymity >= threshold {
            prop_assert_eq!(metrics.high_risk_records, 0);
        }
        prop_assert!(metrics.unique_records <= data.len());
        if metrics.k_anonymity > 1 {
            prop_assert_eq!(metrics.unique_records, 0);
        }
        prop_assert!((0.0..=MAX_OVERALL_RISK).contains(&metrics.overall_risk));
        prop_assert_eq!(metrics.distributed_records(), data.len());
        prop_assert!(metrics.recommendations.len() <= analyzer.config().max_recommendations);
        prop_assert!(!metrics.recommendations.is_empty() || data.len() >= 1000);
    }

    #[test]
    fn recomputation_is_idempotent(data in dataset_strategy(), qi in selection_strategy()) {
        let analyzer = RiskAnalyzer::with_defaults();
        let first = analyzer.analyze(&data, &qi).unwrap();
        let second = analyzer.analyze(&data, &qi).unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn row_order_does_not_change_metrics(data in dataset_strategy(), qi in selection_strategy()) {
        let reversed = Dataset::new(
            data.headers().to_vec(),
            data.rows().iter().rev().cloned().collect(),
        )
        .unwrap();

        let analyzer = RiskAnalyzer::with_defaults();
        let forward = analyzer.analyze(&data, &qi).unwrap();
        let backward = analyzer.analyze(&reversed, &qi).unwrap();

        prop_assert_eq!(forward.k_anonymity, backward.k_anonymity);
        prop_assert_eq!(forward.unique_records, backward.unique_records);
        prop_assert_eq!(forward.high_risk_records, backward.high_risk_records);
        prop_assert_eq!(forward.overall_risk, backward.overall_risk);
        prop_assert_eq!(forward.risk_distribution, backward.risk_distribution);
    }

    #[test]
    fn partitioned_build_matches_whole(
        data in dataset_strategy(),
        qi in selection_strategy(),
        split in 0_usize..60,
    ) {
        let split = split.min(data.len());
        let (left, right) = data.rows().split_at(split);

        let mut merged = EquivalenceClasses::build_rows(&data, &qi, left).unwrap();
        merged.merge(EquivalenceClasses::build_rows(&data, &qi, right).unwrap()).unwrap();

        prop_assert_eq!(merged, EquivalenceClasses::build(&data, &qi).unwrap());
    }
}

#[test]
fn test_integration_delhi_pune_scenario() {
    let mut records = vec![vec![Value::from("Delhi")]; 8];
    records.extend(vec![vec![Value::from("Pune")]; 2]);
    let data = Dataset::from_records(vec!["District".to_string()], records).unwrap();

    let metrics = RiskAnalyzer::with_defaults()
        .analyze(&data, &["District".to_string()])
        .unwrap();

    assert_eq!(metrics.k_anonymity, 2);
    assert_eq!(metrics.unique_records, 0);
    assert_eq!(metrics.high_risk_records, 2);
    assert!((metrics.overall_risk - 0.2).abs() < 1e-12);

    let strict = RiskAnalyzer::new(RiskConfig::new().with_risk_threshold(10))
        .unwrap()
        .analyze(&data, &["District".to_string()])
        .unwrap();
    assert_eq!(strict.high_risk_records, 10);
    assert!((strict.overall_risk - MAX_OVERALL_RISK).abs() < f64::EPSILON);
}

#[test]
fn test_integration_identical_gender_scenario() {
    let data =
        Dataset::from_records(vec!["Gender".to_string()], vec![vec![Value::from("F")]; 5]).unwrap();

    let metrics = RiskAnalyzer::with_defaults()
        .analyze(&data, &["Gender".to_string()])
        .unwrap();

    assert_eq!(metrics.k_anonymity, 5);
    assert_eq!(metrics.high_risk_records, 0);
    assert_eq!(metrics.overall_risk, 0.0);
}

#[test]
fn test_integration_empty_selection_scenario() {
    let records = (0..7).map(|i| vec![Value::from(i64::from(i))]).collect();
    let data = Dataset::from_records(vec!["Age".to_string()], records).unwrap();

    let metrics = RiskAnalyzer::with_defaults().analyze(&data, &[]).unwrap();
    assert_eq!(metrics.k_anonymity, 7);
}

#[test]
fn test_integration_empty_dataset_scenario() {
    let data = Dataset::new(headers(), vec![]).unwrap();
    let (profiles, metrics) = RiskAnalyzer::with_defaults().analyze_auto(&data).unwrap();

    assert!(profiles.iter().all(|p| p.risk_score == 0.0));
    assert_eq!(metrics.overall_risk, 0.0);
    assert_eq!(metrics.k_anonymity, 0);
    assert_eq!(metrics.unique_records, 0);
    assert_eq!(metrics.high_risk_records, 0);
    assert!(
        metrics
            .recommendations
            .iter()
            .any(|r| r == NO_DATA_RECOMMENDATION)
    );
}

#[test]
fn test_integration_metrics_json_shape() {
    let data = Dataset::from_records(
        vec!["Age".to_string(), "Gender".to_string()],
        vec![vec![Value::from(30_i64), Value::from("F")]],
    )
    .unwrap();

    let metrics = RiskAnalyzer::with_defaults()
        .analyze(&data, &["Age".to_string()])
        .unwrap();
    let json = serde_json::to_value(&metrics).unwrap();

    assert_eq!(json["k_anonymity"], 1);
    assert_eq!(json["risk_distribution"][2]["tier"], "High");
    assert_eq!(json["geographic_risk"][0]["region"], "No Geographic Data");
    assert_eq!(json["vulnerable_fields"][0], "Age");
}
