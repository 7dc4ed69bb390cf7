//! Core risk-scoring engine for riskscope.
//!
//! This crate estimates the re-identification risk of released microdata
//! and recommends mitigations. It owns no I/O: an ingestion collaborator
//! hands it a [`Dataset`], and presentation collaborators consume the
//! returned [`RiskMetrics`].
//!
//! # Guarantees
//! - Pure functions over immutable inputs; recomputation is idempotent
//! - Data-shape issues (empty data, missing values, unknown column naming)
//!   never raise; only caller contract violations return errors
//! - Logs carry column names and counts, never cell values
//!
//! # Architecture
//! - [`dataset`]: tagged scalar values and the validated dataset container
//! - [`risk`]: classification, equivalence classes, metrics, geographic
//!   breakdown, recommendations and the [`RiskAnalyzer`] facade
//! - [`error`]: error taxonomy; [`logging`]: subscriber setup for binaries

pub mod dataset;
pub mod error;
pub mod logging;
pub mod risk;

// Re-export commonly used types
pub use dataset::{Dataset, Row, Value};
pub use error::{Result, RiskError};
pub use logging::init_logging;
pub use risk::{
    EquivalenceClasses, OverallRiskStrategy, QuasiIdentifierProfile, RegionRisk, RiskAnalyzer,
    RiskBucket, RiskConfig, RiskMetrics, RiskTier,
};
