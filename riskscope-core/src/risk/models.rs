//! Risk assessment result models.
//!
//! Everything here is plain serializable data. Results expose counts,
//! ratios, scores and column names; the only value-derived strings are the
//! region labels of the geographic breakdown.

use serde::{Deserialize, Serialize};

/// Low/Medium/High classification shared by column profiles and the
/// equivalence-class distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// Low re-identification risk
    Low,
    /// Moderate re-identification risk
    Medium,
    /// High re-identification risk
    High,
}

impl RiskTier {
    /// Returns the display name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    /// Classifies an equivalence-class size: k≥10 Low, 3≤k<10 Medium, k<3 High.
    pub fn for_class_size(size: usize) -> Self {
        match size {
            10.. => RiskTier::Low,
            3..=9 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name-pattern category a column was matched to during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QiCategory {
    /// Age and other precise demographic numbers
    Age,
    /// Fine-grained location (district, city)
    Geographic,
    /// Occupation or job title
    Occupation,
    /// Education level or degree
    Education,
    /// Income or salary bracket
    Income,
    /// Gender or sex
    Gender,
    /// Coarse region (state, province)
    Regional,
    /// Religion, caste and similar sensitive groupings
    Sensitive,
    /// Household or family size
    Household,
    /// Housing or dwelling type
    Housing,
    /// No specific pattern matched
    Generic,
}

/// Re-identification profile of one candidate quasi-identifier column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuasiIdentifierProfile {
    /// Column name
    pub field: String,
    /// Tier derived from the risk score
    pub risk_tier: RiskTier,
    /// Distinct non-empty values divided by non-empty values (0.0-1.0)
    pub uniqueness_ratio: f64,
    /// Number of distinct non-empty values
    pub distinct_value_count: usize,
    /// Risk score (0.0-1.0)
    pub risk_score: f64,
    /// Matched name-pattern category
    pub category: QiCategory,
    /// Human-readable rationale
    pub description: String,
}

/// Row count of one equivalence-class size bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBucket {
    /// Bucket tier
    pub tier: RiskTier,
    /// Display label, e.g. `Low Risk (k≥10)`
    pub label: String,
    /// Rows belonging to classes in this bucket
    pub records: usize,
    /// Display colour as a hex string
    pub color: String,
}

impl RiskBucket {
    /// Creates an empty bucket for the given tier.
    pub fn empty(tier: RiskTier) -> Self {
        let (label, color) = match tier {
            RiskTier::Low => ("Low Risk (k≥10)", "#059669"),
            RiskTier::Medium => ("Medium Risk (3≤k<10)", "#D97706"),
            RiskTier::High => ("High Risk (k<3)", "#DC2626"),
        };
        Self {
            tier,
            label: label.to_string(),
            records: 0,
            color: color.to_string(),
        }
    }

    /// Returns the Low, Medium, High buckets in display order, all empty.
    pub fn all_empty() -> Vec<Self> {
        vec![
            Self::empty(RiskTier::Low),
            Self::empty(RiskTier::Medium),
            Self::empty(RiskTier::High),
        ]
    }
}

/// Risk of one region of the detected geographic column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRisk {
    /// Region label (`Unknown` for empty cells)
    pub region: String,
    /// Risk score on a 0-100 scale
    pub risk: u32,
    /// Rows in this region
    pub records: usize,
}

/// Label of the placeholder entry returned when no geographic column exists.
pub const NO_GEOGRAPHIC_DATA: &str = "No Geographic Data";

impl RegionRisk {
    /// Placeholder entry signalling that no geographic column was detected.
    pub fn placeholder(records: usize) -> Self {
        Self {
            region: NO_GEOGRAPHIC_DATA.to_string(),
            risk: 0,
            records,
        }
    }

    /// Returns true for the placeholder entry.
    pub fn is_placeholder(&self) -> bool {
        self.region == NO_GEOGRAPHIC_DATA && self.risk == 0
    }
}

/// Aggregated re-identification risk for one dataset and QI selection.
///
/// Recomputed wholesale whenever the dataset or selection changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Overall risk score (0.0-0.95)
    pub overall_risk: f64,
    /// Smallest equivalence-class size (0 only for an empty dataset)
    pub k_anonymity: usize,
    /// Number of equivalence classes of size exactly 1
    pub unique_records: usize,
    /// Rows in classes smaller than the risk threshold
    pub high_risk_records: usize,
    /// Quasi-identifier columns the classes were built over
    pub vulnerable_fields: Vec<String>,
    /// Row counts per class-size bucket, Low/Medium/High
    pub risk_distribution: Vec<RiskBucket>,
    /// Per-region breakdown, highest risk first
    pub geographic_risk: Vec<RegionRisk>,
    /// Mitigation suggestions, most urgent first
    pub recommendations: Vec<String>,
}

impl RiskMetrics {
    /// Creates zeroed metrics for the given QI selection.
    pub fn empty(vulnerable_fields: Vec<String>) -> Self {
        Self {
            overall_risk: 0.0,
            k_anonymity: 0,
            unique_records: 0,
            high_risk_records: 0,
            vulnerable_fields,
            risk_distribution: RiskBucket::all_empty(),
            geographic_risk: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Sets the geographic breakdown.
    pub fn with_geographic_risk(mut self, geographic_risk: Vec<RegionRisk>) -> Self {
        self.geographic_risk = geographic_risk;
        self
    }

    /// Sets the recommendations.
    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Total rows across the distribution buckets.
    pub fn distributed_records(&self) -> usize {
        self.risk_distribution.iter().map(|b| b.records).sum()
    }
}
