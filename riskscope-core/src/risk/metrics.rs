//! Risk metrics over equivalence classes.
//!
//! Derives k-anonymity, unique and high-risk record counts, the overall
//! risk score and the class-size distribution. Geographic breakdown and
//! recommendations are filled in by their own modules.

use super::config::RiskConfig;
use super::equivalence::EquivalenceClasses;
use super::models::{RiskBucket, RiskMetrics, RiskTier};

/// Recommendation returned for a dataset without rows.
pub const NO_DATA_RECOMMENDATION: &str = "No data available for analysis";

/// Computes risk metrics from equivalence classes.
///
/// The total row count is taken from the classes themselves, so the
/// distribution always sums to it. With no rows every numeric field is zero
/// and the only recommendation is [`NO_DATA_RECOMMENDATION`].
pub fn calculate_metrics(classes: &EquivalenceClasses, config: &RiskConfig) -> RiskMetrics {
    let vulnerable_fields = classes.columns().to_vec();
    let total_rows = classes.total_records();

    if total_rows == 0 {
        tracing::debug!("No rows to assess; returning empty metrics");
        return RiskMetrics::empty(vulnerable_fields)
            .with_recommendations(vec![NO_DATA_RECOMMENDATION.to_string()]);
    }

    let k_anonymity = classes.sizes().min().unwrap_or(0);
    let unique_records = classes.sizes().filter(|&size| size == 1).count();
    let high_risk_records: usize = classes
        .sizes()
        .filter(|&size| size < config.risk_threshold)
        .sum();

    let overall_risk =
        config
            .overall_risk_strategy
            .overall_risk(high_risk_records, unique_records, total_rows);

    let mut risk_distribution = RiskBucket::all_empty();
    for size in classes.sizes() {
        let tier = RiskTier::for_class_size(size);
        if let Some(bucket) = risk_distribution.iter_mut().find(|b| b.tier == tier) {
            bucket.records += size;
        }
    }

    tracing::debug!(
        "k-anonymity {}, {} unique classes, {} high-risk rows of {}, overall risk {:.3}",
        k_anonymity,
        unique_records,
        high_risk_records,
        total_rows,
        overall_risk
    );

    RiskMetrics {
        overall_risk,
        k_anonymity,
        unique_records,
        high_risk_records,
        vulnerable_fields,
        risk_distribution,
        geographic_risk: Vec::new(),
        recommendations: Vec::new(),
    }
}
