//! Risk assessment configuration.
//!
//! This module provides the knobs callers may turn on the engine: the class
//! size below which records count as high risk, the overall-risk formula,
//! and the output caps for recommendations and the geographic breakdown.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default class size below which records are counted as high risk.
pub const DEFAULT_RISK_THRESHOLD: usize = 5;

/// Default maximum number of recommendations returned.
///
/// Earlier releases capped the list at 6; the current cap is 8.
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 8;

/// Default number of regions kept in the geographic breakdown.
pub const DEFAULT_GEOGRAPHIC_TOP_N: usize = 10;

/// Formula used to fold class statistics into the overall risk score.
///
/// Both formulas are clamped to at most 0.95.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverallRiskStrategy {
    /// `high_risk_records / total_rows`
    Ratio,
    /// `high_risk_records / total_rows + unique_records * 0.1 / total_rows`
    #[default]
    UniquenessPenalized,
}

/// Weight applied to unique records by [`OverallRiskStrategy::UniquenessPenalized`].
pub const UNIQUENESS_PENALTY: f64 = 0.1;

/// Upper bound of the overall risk score.
pub const MAX_OVERALL_RISK: f64 = 0.95;

impl OverallRiskStrategy {
    /// Computes the overall risk score for the given counts.
    ///
    /// Returns 0.0 when `total_rows` is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn overall_risk(self, high_risk_records: usize, unique_records: usize, total_rows: usize) -> f64 {
        if total_rows == 0 {
            return 0.0;
        }

        let total = total_rows as f64;
        let ratio = high_risk_records as f64 / total;
        let raw = match self {
            OverallRiskStrategy::Ratio => ratio,
            OverallRiskStrategy::UniquenessPenalized => {
                ratio + unique_records as f64 * UNIQUENESS_PENALTY / total
            }
        };

        raw.clamp(0.0, MAX_OVERALL_RISK)
    }
}

/// Risk assessment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Equivalence classes strictly smaller than this are high risk
    pub risk_threshold: usize,
    /// Maximum number of recommendations returned
    pub max_recommendations: usize,
    /// Overall risk formula
    pub overall_risk_strategy: OverallRiskStrategy,
    /// Number of regions kept in the geographic breakdown
    pub geographic_top_n: usize,
}

/// Validation errors for risk configuration.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("risk_threshold must be at least 1")]
    InvalidRiskThreshold,
    #[error("max_recommendations must be at least 1")]
    InvalidRecommendationCap,
    #[error("geographic_top_n must be at least 1")]
    InvalidGeographicTopN,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            overall_risk_strategy: OverallRiskStrategy::default(),
            geographic_top_n: DEFAULT_GEOGRAPHIC_TOP_N,
        }
    }
}

impl RiskConfig {
    /// Creates a new risk config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the high-risk class size threshold.
    pub fn with_risk_threshold(mut self, threshold: usize) -> Self {
        if threshold == 0 {
            tracing::warn!("risk_threshold 0 raised to 1");
        }
        self.risk_threshold = threshold.max(1);
        self
    }

    /// Builder method to set the recommendation cap.
    pub fn with_max_recommendations(mut self, cap: usize) -> Self {
        if cap == 0 {
            tracing::warn!("max_recommendations 0 raised to 1");
        }
        self.max_recommendations = cap.max(1);
        self
    }

    /// Builder method to set the overall risk formula.
    pub fn with_overall_risk_strategy(mut self, strategy: OverallRiskStrategy) -> Self {
        self.overall_risk_strategy = strategy;
        self
    }

    /// Builder method to set the geographic breakdown size.
    pub fn with_geographic_top_n(mut self, top_n: usize) -> Self {
        if top_n == 0 {
            tracing::warn!("geographic_top_n 0 raised to 1");
        }
        self.geographic_top_n = top_n.max(1);
        self
    }

    /// Validates the configuration.
    ///
    /// Only reachable with invalid values when fields are set directly or
    /// the config was deserialized.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.risk_threshold == 0 {
            return Err(ConfigValidationError::InvalidRiskThreshold);
        }
        if self.max_recommendations == 0 {
            return Err(ConfigValidationError::InvalidRecommendationCap);
        }
        if self.geographic_top_n == 0 {
            return Err(ConfigValidationError::InvalidGeographicTopN);
        }
        Ok(())
    }
}
