//! Report envelope and renderers.
//!
//! A [`RiskReport`] wraps the engine output with provenance: the input it
//! came from, when it was produced and the configuration used. Only the
//! envelope carries a timestamp, so the embedded metrics stay identical
//! across runs over the same input.

use askama::Template;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use riskscope_core::risk::OverallRiskStrategy;
use riskscope_core::{
    Dataset, QuasiIdentifierProfile, Result, RiskConfig, RiskError, RiskMetrics,
};

/// Output format of a rendered report.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON structured output
    #[default]
    Json,
    /// Markdown summary
    Markdown,
}

/// Serializable risk assessment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// Time the report was produced
    pub generated_at: DateTime<Utc>,
    /// Input the dataset was read from
    pub source: String,
    /// Number of rows assessed
    pub row_count: usize,
    /// Number of columns in the dataset
    pub column_count: usize,
    /// Configuration the metrics were computed with
    pub config: RiskConfig,
    /// Column profiles, present when quasi-identifiers were auto-selected
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<QuasiIdentifierProfile>,
    /// Engine output
    pub metrics: RiskMetrics,
}

impl RiskReport {
    /// Creates a report stamped with the current time.
    pub fn new(
        source: impl Into<String>,
        dataset: &Dataset,
        config: RiskConfig,
        profiles: Vec<QuasiIdentifierProfile>,
        metrics: RiskMetrics,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            row_count: dataset.len(),
            column_count: dataset.headers().len(),
            config,
            profiles,
            metrics,
        }
    }

    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.to_json(),
            OutputFormat::Markdown => self.to_markdown(),
        }
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RiskError::serialization("JSON report serialization", e))
    }

    /// Renders the report as a Markdown summary.
    pub fn to_markdown(&self) -> Result<String> {
        MarkdownReport::from_report(self)
            .render()
            .map_err(|e| RiskError::render("Markdown report template", e))
    }
}

/// Display name of a risk formula, matching the CLI spelling.
pub fn formula_name(strategy: OverallRiskStrategy) -> &'static str {
    match strategy {
        OverallRiskStrategy::Ratio => "ratio",
        OverallRiskStrategy::UniquenessPenalized => "uniqueness-penalized",
    }
}

struct ProfileRow {
    field: String,
    tier: String,
    score: String,
    uniqueness: String,
    distinct: usize,
    description: String,
}

struct BucketRow {
    label: String,
    records: usize,
    share: String,
}

struct RegionRow {
    region: String,
    risk: u32,
    records: usize,
}

#[derive(Template)]
#[template(
    ext = "md",
    source = r#"# Re-identification Risk Report

- **Source:** {{ source }}
- **Generated:** {{ generated_at }}
- **Records:** {{ row_count }} ({{ column_count }} columns)
- **Quasi-identifiers:** {{ selection }}

## Summary

| Metric | Value |
|---|---|
| Overall risk | {{ overall_risk }} |
| k-anonymity | {{ k_anonymity }} |
| Unique records | {{ unique_records }} |
| High-risk records (k<{{ threshold }}) | {{ high_risk_records }} |
| Risk formula | {{ formula }} |

## Risk Distribution

| Tier | Records | Share |
|---|---:|---:|
{% for bucket in buckets -%}
| {{ bucket.label }} | {{ bucket.records }} | {{ bucket.share }} |
{% endfor %}
{%- if !profiles.is_empty() %}
## Column Profiles

| Column | Tier | Score | Uniqueness | Distinct | Notes |
|---|---|---:|---:|---:|---|
{% for p in profiles -%}
| {{ p.field }} | {{ p.tier }} | {{ p.score }} | {{ p.uniqueness }} | {{ p.distinct }} | {{ p.description }} |
{% endfor %}
{%- endif %}
{%- if !regions.is_empty() %}
## Geographic Risk

| Region | Risk | Records |
|---|---:|---:|
{% for r in regions -%}
| {{ r.region }} | {{ r.risk }} | {{ r.records }} |
{% endfor %}
{%- endif %}
## Recommendations

{% if recommendations.is_empty() -%}
No recommendations.
{% else -%}
{% for rec in recommendations -%}
1. {{ rec }}
{% endfor %}
{%- endif %}
"#
)]
struct MarkdownReport {
    source: String,
    generated_at: String,
    row_count: usize,
    column_count: usize,
    selection: String,
    overall_risk: String,
    k_anonymity: usize,
    unique_records: usize,
    high_risk_records: usize,
    threshold: usize,
    formula: &'static str,
    buckets: Vec<BucketRow>,
    profiles: Vec<ProfileRow>,
    regions: Vec<RegionRow>,
    recommendations: Vec<String>,
}

impl MarkdownReport {
    fn from_report(report: &RiskReport) -> Self {
        let metrics = &report.metrics;
        let selection = if metrics.vulnerable_fields.is_empty() {
            "(none)".to_string()
        } else {
            metrics
                .vulnerable_fields
                .iter()
                .map(|f| table_cell(f))
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            source: report.source.clone(),
            generated_at: report.generated_at.to_rfc3339(),
            row_count: report.row_count,
            column_count: report.column_count,
            selection,
            overall_risk: format!("{:.1}%", metrics.overall_risk * 100.0),
            k_anonymity: metrics.k_anonymity,
            unique_records: metrics.unique_records,
            high_risk_records: metrics.high_risk_records,
            threshold: report.config.risk_threshold,
            formula: formula_name(report.config.overall_risk_strategy),
            buckets: metrics
                .risk_distribution
                .iter()
                .map(|b| BucketRow {
                    label: b.label.clone(),
                    records: b.records,
                    share: percent(b.records, report.row_count),
                })
                .collect(),
            profiles: report
                .profiles
                .iter()
                .map(|p| ProfileRow {
                    field: table_cell(&p.field),
                    tier: p.risk_tier.to_string(),
                    score: format!("{:.2}", p.risk_score),
                    uniqueness: format!("{:.1}%", p.uniqueness_ratio * 100.0),
                    distinct: p.distinct_value_count,
                    description: table_cell(&p.description),
                })
                .collect(),
            regions: metrics
                .geographic_risk
                .iter()
                .map(|r| RegionRow {
                    region: table_cell(&r.region),
                    risk: r.risk,
                    records: r.records,
                })
                .collect(),
            recommendations: metrics.recommendations.clone(),
        }
    }
}

/// Escapes pipes and flattens newlines so a value fits in one table cell.
fn table_cell(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' => out.push_str("\\|"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> String {
    let value = if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    };
    format!("{:.1}%", value)
}
