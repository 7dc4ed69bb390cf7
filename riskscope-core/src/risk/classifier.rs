//! Quasi-identifier classification.
//!
//! Columns are scored from two signals: the column name, matched against a
//! fixed rule table, and the uniqueness of its non-empty values. Each rule
//! maps uniqueness through `min(cap, uniqueness * weight + offset)` and
//! buckets the result with its own tier thresholds.

use std::collections::HashSet;

use crate::dataset::Dataset;

use super::models::{QiCategory, QuasiIdentifierProfile, RiskTier};

/// Scoring parameters for one name-pattern category.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScoringRule {
    pub(crate) category: QiCategory,
    /// Lower-case substrings; any match selects the rule
    pub(crate) patterns: &'static [&'static str],
    pub(crate) weight: f64,
    pub(crate) offset: f64,
    pub(crate) cap: f64,
    /// Scores strictly above this are High (`None`: never High)
    pub(crate) high_above: Option<f64>,
    /// Scores strictly above this are at least Medium (`None`: never Medium)
    pub(crate) medium_above: Option<f64>,
    /// Leading phrase of the description
    pub(crate) subject: &'static str,
    /// Noun for the distinct values, e.g. "locations"
    pub(crate) unit: &'static str,
    /// Trailing risk remark
    pub(crate) remark: &'static str,
}

impl ScoringRule {
    fn matches(&self, lowered_name: &str) -> bool {
        self.patterns.iter().any(|p| lowered_name.contains(p))
    }

    fn score(&self, uniqueness: f64) -> f64 {
        // Two roundings, not mul_add: tier thresholds are strict and a
        // single-rounded score can land one ulp above them.
        #[allow(clippy::suboptimal_flops)]
        let raw = uniqueness * self.weight + self.offset;
        raw.min(self.cap)
    }

    fn tier(&self, score: f64) -> RiskTier {
        if self.high_above.is_some_and(|t| score > t) {
            RiskTier::High
        } else if self.medium_above.is_some_and(|t| score > t) {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

/// Classification rules in priority order; the first matching rule wins.
pub(crate) const SCORING_RULES: &[ScoringRule] = &[
    ScoringRule {
        category: QiCategory::Age,
        patterns: &["age"],
        weight: 1.2,
        offset: 0.3,
        cap: 0.9,
        high_above: Some(0.7),
        medium_above: Some(0.4),
        subject: "Age field",
        unit: "distinct values",
        remark: "High re-identification risk.",
    },
    ScoringRule {
        category: QiCategory::Geographic,
        patterns: &["district", "location", "city"],
        weight: 1.1,
        offset: 0.25,
        cap: 0.85,
        high_above: Some(0.6),
        medium_above: Some(0.35),
        subject: "Geographic identifier",
        unit: "locations",
        remark: "Location-based risk.",
    },
    ScoringRule {
        category: QiCategory::Occupation,
        patterns: &["occupation", "job", "work"],
        weight: 1.3,
        offset: 0.4,
        cap: 0.95,
        high_above: Some(0.75),
        medium_above: Some(0.45),
        subject: "Occupation field",
        unit: "job types",
        remark: "Professional identity risk.",
    },
    ScoringRule {
        category: QiCategory::Education,
        patterns: &["education", "degree"],
        weight: 0.8,
        offset: 0.2,
        cap: 0.7,
        high_above: None,
        medium_above: Some(0.5),
        subject: "Education level",
        unit: "categories",
        remark: "Educational background risk.",
    },
    ScoringRule {
        category: QiCategory::Income,
        patterns: &["income", "salary", "bracket"],
        weight: 0.9,
        offset: 0.3,
        cap: 0.75,
        high_above: Some(0.6),
        medium_above: Some(0.35),
        subject: "Income data",
        unit: "brackets",
        remark: "Economic status risk.",
    },
    ScoringRule {
        category: QiCategory::Gender,
        patterns: &["gender", "sex"],
        weight: 0.5,
        offset: 0.0,
        cap: 0.3,
        high_above: None,
        medium_above: None,
        subject: "Gender field",
        unit: "categories",
        remark: "Low individual risk.",
    },
    ScoringRule {
        category: QiCategory::Regional,
        patterns: &["state", "province"],
        weight: 0.7,
        offset: 0.15,
        cap: 0.6,
        high_above: None,
        medium_above: Some(0.45),
        subject: "State-level data",
        unit: "states",
        remark: "Regional identifier.",
    },
    ScoringRule {
        category: QiCategory::Sensitive,
        patterns: &["religion", "caste"],
        weight: 0.8,
        offset: 0.25,
        cap: 0.65,
        high_above: None,
        medium_above: Some(0.5),
        subject: "Sensitive category",
        unit: "groups",
        remark: "Cultural identifier risk.",
    },
    ScoringRule {
        category: QiCategory::Household,
        patterns: &["family", "size", "household"],
        weight: 0.6,
        offset: 0.1,
        cap: 0.5,
        high_above: None,
        medium_above: Some(0.35),
        subject: "Household data",
        unit: "values",
        remark: "Demographic risk.",
    },
    ScoringRule {
        category: QiCategory::Housing,
        patterns: &["housing", "type", "dwelling"],
        weight: 0.6,
        offset: 0.1,
        cap: 0.45,
        high_above: None,
        medium_above: Some(0.3),
        subject: "Housing type",
        unit: "categories",
        remark: "Lifestyle indicator.",
    },
];

/// Rule applied when no name pattern matches.
pub(crate) const GENERIC_RULE: ScoringRule = ScoringRule {
    category: QiCategory::Generic,
    patterns: &[],
    weight: 0.7,
    offset: 0.0,
    cap: 0.7,
    high_above: Some(0.6),
    medium_above: Some(0.3),
    subject: "Generic field",
    unit: "distinct values",
    remark: "",
};

/// Returns the rule for a column name.
pub(crate) fn rule_for(column: &str) -> &'static ScoringRule {
    let lowered = column.to_lowercase();
    SCORING_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .unwrap_or(&GENERIC_RULE)
}

/// Returns true for columns treated as record identifiers rather than
/// quasi-identifiers: any name containing "id", case-insensitively.
pub fn is_identifier_column(column: &str) -> bool {
    column.to_lowercase().contains("id")
}

/// Scores every non-identifier column of the dataset.
///
/// Profiles are sorted by descending risk score. The sort is stable, so
/// columns with equal scores keep their header order.
pub fn classify_columns(dataset: &Dataset) -> Vec<QuasiIdentifierProfile> {
    let mut profiles: Vec<QuasiIdentifierProfile> = dataset
        .headers()
        .iter()
        .filter(|column| {
            let skip = is_identifier_column(column);
            if skip {
                tracing::trace!("Skipping identifier column '{}'", column);
            }
            !skip
        })
        .map(|column| profile_column(dataset, column))
        .collect();

    profiles.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    profiles
}

#[allow(clippy::cast_precision_loss)]
fn profile_column(dataset: &Dataset, column: &str) -> QuasiIdentifierProfile {
    let mut distinct: HashSet<String> = HashSet::new();
    let mut non_empty: usize = 0;
    for key in dataset.column(column).filter_map(|value| value.as_key()) {
        non_empty += 1;
        distinct.insert(key);
    }

    let distinct_value_count = distinct.len();
    let uniqueness_ratio = if non_empty == 0 {
        0.0
    } else {
        distinct_value_count as f64 / non_empty as f64
    };

    let rule = rule_for(column);
    // A column without values cannot single anyone out.
    let risk_score = if non_empty == 0 {
        0.0
    } else {
        rule.score(uniqueness_ratio)
    };
    let risk_tier = rule.tier(risk_score);

    let mut description = format!(
        "{} with {} {} ({:.1}% uniqueness).",
        rule.subject,
        distinct_value_count,
        rule.unit,
        uniqueness_ratio * 100.0
    );
    if !rule.remark.is_empty() {
        description.push(' ');
        description.push_str(rule.remark);
    }

    tracing::trace!(
        "Column '{}' matched {:?}: uniqueness {:.3}, score {:.3}, tier {}",
        column,
        rule.category,
        uniqueness_ratio,
        risk_score,
        risk_tier
    );

    QuasiIdentifierProfile {
        field: column.to_string(),
        risk_tier,
        uniqueness_ratio,
        distinct_value_count,
        risk_score,
        category: rule.category,
        description,
    }
}

/// Auto-selects quasi-identifiers: every High or Medium profile, in the
/// order given (ranked order when fed from [`classify_columns`]).
pub fn select_quasi_identifiers(profiles: &[QuasiIdentifierProfile]) -> Vec<String> {
    profiles
        .iter()
        .filter(|p| matches!(p.risk_tier, RiskTier::High | RiskTier::Medium))
        .map(|p| p.field.clone())
        .collect()
}
