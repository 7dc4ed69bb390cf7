//! Geographic risk breakdown.
//!
//! Independent of the quasi-identifier selection: it always works on the
//! geographic column it can detect from the headers. Regions with few
//! records are easier to single out, so risk falls as the record count
//! grows; rural regions carry a fixed surcharge.

use std::collections::HashMap;

use crate::dataset::Dataset;

use super::models::RegionRisk;

/// Label used for rows with an empty geographic cell.
pub const UNKNOWN_REGION: &str = "Unknown";

const BASE_RISK: i64 = 100;
const RISK_PER_RECORD: i64 = 3;
const RURAL_SURCHARGE: i64 = 20;
const MIN_REGION_RISK: i64 = 10;
const MAX_REGION_RISK: i64 = 95;

/// Detects the geographic column.
///
/// A header containing "district" is preferred; otherwise the first header
/// containing "state", "city" or "location". Matching is case-insensitive.
pub fn detect_geographic_column(dataset: &Dataset) -> Option<&str> {
    let lowered: Vec<(String, &str)> = dataset
        .headers()
        .iter()
        .map(|h| (h.to_lowercase(), h.as_str()))
        .collect();

    lowered
        .iter()
        .find(|(lower, _)| lower.contains("district"))
        .or_else(|| {
            lowered.iter().find(|(lower, _)| {
                ["state", "city", "location"]
                    .iter()
                    .any(|p| lower.contains(p))
            })
        })
        .map(|(_, original)| *original)
}

/// Scores one region from its record count.
pub fn region_risk(region: &str, records: usize) -> u32 {
    let records = i64::try_from(records).unwrap_or(i64::MAX);
    let surcharge = if region.to_lowercase().contains("rural") {
        RURAL_SURCHARGE
    } else {
        0
    };
    let raw = BASE_RISK
        .saturating_sub(records.saturating_mul(RISK_PER_RECORD))
        .saturating_add(surcharge);
    // The clamp keeps the value inside 10..=95.
    u32::try_from(raw.clamp(MIN_REGION_RISK, MAX_REGION_RISK)).unwrap_or(0)
}

/// Computes the per-region risk breakdown, highest risk first.
///
/// Returns a single placeholder entry when no geographic column exists and
/// an empty list when the dataset has no rows. Ties keep the order in which
/// regions first appear; at most `top_n` regions are returned.
pub fn analyze_geographic_risk(dataset: &Dataset, top_n: usize) -> Vec<RegionRisk> {
    let Some(column) = detect_geographic_column(dataset) else {
        tracing::debug!("No geographic column detected");
        return vec![RegionRisk::placeholder(dataset.len())];
    };

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in dataset.column(column) {
        let region = value
            .as_key()
            .unwrap_or_else(|| UNKNOWN_REGION.to_string());
        match counts.get_mut(&region) {
            Some(count) => *count += 1,
            None => {
                counts.insert(region.clone(), 1);
                order.push(region);
            }
        }
    }

    let mut regions: Vec<RegionRisk> = order
        .into_iter()
        .map(|region| {
            let records = counts.get(&region).copied().unwrap_or(0);
            RegionRisk {
                risk: region_risk(&region, records),
                region,
                records,
            }
        })
        .collect();

    regions.sort_by(|a, b| b.risk.cmp(&a.risk));
    regions.truncate(top_n);

    tracing::debug!(
        "Geographic breakdown on column '{}': {} regions reported",
        column,
        regions.len()
    );
    regions
}
