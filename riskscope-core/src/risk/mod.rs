//! Re-identification risk assessment module.
//!
//! This module measures how easily records in a released microdata set can
//! be singled out:
//! - **Classification**: rank columns as quasi-identifiers by name and uniqueness
//! - **Equivalence classes**: group rows by their quasi-identifier values
//! - **Metrics**: k-anonymity, unique and high-risk records, overall risk
//! - **Geographic breakdown**: per-region risk on the detected location column
//! - **Recommendations**: rule-based mitigation suggestions
//!
//! # Privacy Guarantees
//! - Metrics expose counts, ratios and column names; region labels are the
//!   only value-derived output
//! - No I/O and no state between calls: identical inputs give identical output
//!
//! # Example
//! ```rust,ignore
//! use riskscope_core::risk::{RiskAnalyzer, RiskConfig};
//!
//! let analyzer = RiskAnalyzer::new(RiskConfig::default())?;
//! let (profiles, metrics) = analyzer.analyze_auto(&dataset)?;
//! println!("k-anonymity: {}", metrics.k_anonymity);
//! ```

mod analyzer;
mod classifier;
mod config;
mod equivalence;
mod geographic;
mod metrics;
mod models;
mod recommendations;

// Re-export public API
pub use analyzer::RiskAnalyzer;
pub use classifier::{classify_columns, is_identifier_column, select_quasi_identifiers};
pub use config::{
    ConfigValidationError, DEFAULT_GEOGRAPHIC_TOP_N, DEFAULT_MAX_RECOMMENDATIONS,
    DEFAULT_RISK_THRESHOLD, MAX_OVERALL_RISK, OverallRiskStrategy, RiskConfig,
    UNIQUENESS_PENALTY,
};
pub use equivalence::{ClassKey, EquivalenceClasses, KeyPart};
pub use geographic::{
    UNKNOWN_REGION, analyze_geographic_risk, detect_geographic_column, region_risk,
};
pub use metrics::{NO_DATA_RECOMMENDATION, calculate_metrics};
pub use models::{
    NO_GEOGRAPHIC_DATA, QiCategory, QuasiIdentifierProfile, RegionRisk, RiskBucket,
    RiskMetrics, RiskTier,
};
pub use recommendations::{RecommendationContext, generate_recommendations};
