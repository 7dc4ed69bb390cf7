//! Risk analyzer facade.
//!
//! This module provides the `RiskAnalyzer` that runs the full pipeline:
//! column classification, equivalence classes, metrics, the geographic
//! breakdown and recommendations.

use crate::Result;
use crate::dataset::Dataset;

use super::classifier::{classify_columns, select_quasi_identifiers};
use super::config::RiskConfig;
use super::equivalence::EquivalenceClasses;
use super::geographic::analyze_geographic_risk;
use super::metrics::calculate_metrics;
use super::models::{QuasiIdentifierProfile, RiskMetrics};
use super::recommendations::{RecommendationContext, generate_recommendations};

/// Re-identification risk analyzer.
///
/// The analyzer holds configuration only; every call is an independent,
/// pure computation over the dataset it is given.
///
/// # Example
///
/// ```rust
/// use riskscope_core::dataset::{Dataset, Value};
/// use riskscope_core::risk::RiskAnalyzer;
///
/// let dataset = Dataset::from_records(
///     vec!["Gender".to_string()],
///     vec![vec![Value::from("F")]; 5],
/// )?;
///
/// let analyzer = RiskAnalyzer::with_defaults();
/// let metrics = analyzer.analyze(&dataset, &["Gender".to_string()])?;
/// assert_eq!(metrics.k_anonymity, 5);
/// # Ok::<(), riskscope_core::RiskError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RiskAnalyzer {
    config: RiskConfig,
}

impl RiskAnalyzer {
    /// Creates a new risk analyzer, validating the configuration.
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a new risk analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: RiskConfig::default(),
        }
    }

    /// Returns a reference to the analyzer configuration.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Ranks the dataset's candidate quasi-identifier columns.
    pub fn profile(&self, dataset: &Dataset) -> Vec<QuasiIdentifierProfile> {
        classify_columns(dataset)
    }

    /// Assesses the dataset against an explicit quasi-identifier selection.
    ///
    /// # Errors
    /// Returns [`crate::RiskError::UnknownColumn`] if a selected column is
    /// not one of the dataset headers. Empty datasets are not an error.
    pub fn analyze(&self, dataset: &Dataset, quasi_identifiers: &[String]) -> Result<RiskMetrics> {
        tracing::debug!(
            "Assessing {} rows against {} quasi-identifiers",
            dataset.len(),
            quasi_identifiers.len()
        );

        let classes = EquivalenceClasses::build(dataset, quasi_identifiers)?;
        let metrics = calculate_metrics(&classes, &self.config);

        if dataset.is_empty() {
            return Ok(metrics);
        }

        let geographic_risk = analyze_geographic_risk(dataset, self.config.geographic_top_n);
        let context = RecommendationContext {
            dataset_size: dataset.len(),
            quasi_identifiers,
            k_anonymity: metrics.k_anonymity,
            overall_risk: metrics.overall_risk,
            unique_records: metrics.unique_records,
            high_risk_records: metrics.high_risk_records,
        };
        let recommendations = generate_recommendations(&context, self.config.max_recommendations);

        Ok(metrics
            .with_geographic_risk(geographic_risk)
            .with_recommendations(recommendations))
    }

    /// Classifies the columns, selects every High or Medium column and
    /// assesses the dataset against that selection.
    ///
    /// Returns the profiles alongside the metrics so callers can show why
    /// each column was picked.
    pub fn analyze_auto(&self, dataset: &Dataset) -> Result<(Vec<QuasiIdentifierProfile>, RiskMetrics)> {
        let profiles = self.profile(dataset);
        let selection = select_quasi_identifiers(&profiles);
        tracing::info!(
            "Auto-selected {} of {} candidate quasi-identifiers",
            selection.len(),
            profiles.len()
        );
        let metrics = self.analyze(dataset, &selection)?;
        Ok((profiles, metrics))
    }
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
