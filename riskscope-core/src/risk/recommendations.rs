//! Rule-based mitigation recommendations.
//!
//! Rules are evaluated in a fixed order and are not mutually exclusive;
//! every rule whose condition holds contributes one line. The result is
//! truncated to the configured cap, so earlier rules take precedence.

/// Inputs the recommendation rules look at.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationContext<'a> {
    /// Number of rows in the dataset
    pub dataset_size: usize,
    /// Quasi-identifier columns in use
    pub quasi_identifiers: &'a [String],
    /// Smallest equivalence-class size
    pub k_anonymity: usize,
    /// Overall risk score
    pub overall_risk: f64,
    /// Equivalence classes of size one
    pub unique_records: usize,
    /// Rows in classes below the risk threshold
    pub high_risk_records: usize,
}

/// Datasets smaller than this get a synthetic-data suggestion.
const SMALL_DATASET_ROWS: usize = 1000;

/// Record-level perturbation is advised once more than 1/N of rows are high risk.
const HIGH_RISK_SHARE_DIVISOR: usize = 5;

/// Generates recommendations, most urgent first, at most `max` entries.
pub fn generate_recommendations(context: &RecommendationContext<'_>, max: usize) -> Vec<String> {
    let mut recommendations = Vec::new();
    let k = context.k_anonymity;

    if k < 2 {
        recommendations.push(format!(
            "Critical: k-anonymity is {}. Immediate data suppression required for {} unique records.",
            k, context.unique_records
        ));
    } else if k < 3 {
        recommendations.push(format!(
            "High risk: k-anonymity is {}. Apply generalization to achieve k≥5 for adequate protection.",
            k
        ));
    } else if k < 5 {
        recommendations.push(format!(
            "Medium risk: k-anonymity is {}. Consider increasing to k≥5 for better privacy protection.",
            k
        ));
    }

    let risk_percent = context.overall_risk * 100.0;
    if context.overall_risk > 0.7 {
        recommendations.push(format!(
            "Severe risk: {:.1}% overall risk. Apply multiple privacy techniques immediately.",
            risk_percent
        ));
    } else if context.overall_risk > 0.5 {
        recommendations.push(format!(
            "High risk: {:.1}% overall risk. Implement differential privacy for sensitive attributes.",
            risk_percent
        ));
    } else if context.overall_risk > 0.3 {
        recommendations.push(format!(
            "Moderate risk: {:.1}% overall risk. Standard privacy measures recommended.",
            risk_percent
        ));
    }

    for field in context.quasi_identifiers {
        recommendations.extend(field_recommendations(field));
    }

    if context.unique_records > 0 {
        recommendations.push(format!(
            "Unique records: {} records ({:.1}%) are unique. Apply record suppression or synthetic data generation.",
            context.unique_records,
            percent(context.unique_records, context.dataset_size)
        ));
    }

    if context.high_risk_records.saturating_mul(HIGH_RISK_SHARE_DIVISOR) > context.dataset_size {
        recommendations.push(format!(
            "High-risk records: {} records ({:.1}%) are high-risk. Consider microaggregation or data swapping.",
            context.high_risk_records,
            percent(context.high_risk_records, context.dataset_size)
        ));
    }

    if context.dataset_size < SMALL_DATASET_ROWS {
        recommendations.push(format!(
            "Small dataset: with only {} records, consider synthetic data generation to increase dataset size safely.",
            context.dataset_size
        ));
    }

    if recommendations.len() > max {
        tracing::debug!(
            "Truncating {} recommendations to {}",
            recommendations.len(),
            max
        );
        recommendations.truncate(max);
    }
    recommendations
}

/// Keyword rules for one QI column; a column may match several.
fn field_recommendations(field: &str) -> Vec<String> {
    let lower = field.to_lowercase();
    let has = |patterns: &[&str]| patterns.iter().any(|p| lower.contains(p));
    let mut out = Vec::new();

    if has(&["age"]) {
        out.push(format!(
            "Age field '{}': group specific ages into 5-year ranges (e.g. 25-29, 30-34) to reduce precision.",
            field
        ));
    }
    if has(&["district", "location", "city"]) {
        out.push(format!(
            "Geographic field '{}': generalize rare locations to state level or suppress locations with <5 records.",
            field
        ));
    }
    if has(&["occupation", "job"]) {
        out.push(format!(
            "Occupation field '{}': suppress rare occupations or group into broader categories (e.g. 'Professional', 'Service').",
            field
        ));
    }
    if has(&["income", "salary"]) {
        out.push(format!(
            "Income field '{}': add differential privacy noise or use broader income brackets to protect economic status.",
            field
        ));
    }
    if has(&["education"]) {
        out.push(format!(
            "Education field '{}': combine similar education levels (e.g. merge 'Graduate' and 'Post Graduate').",
            field
        ));
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(qi: &[String]) -> RecommendationContext<'_> {
        RecommendationContext {
            dataset_size: 5000,
            quasi_identifiers: qi,
            k_anonymity: 10,
            overall_risk: 0.0,
            unique_records: 0,
            high_risk_records: 0,
        }
    }

    #[test]
    fn test_safe_large_dataset_has_no_recommendations() {
        let recs = generate_recommendations(&context(&[]), 8);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_k_anonymity_rules_are_exclusive_bands() {
        for (k, prefix) in [(1, "Critical"), (2, "High risk"), (4, "Medium risk")] {
            let ctx = RecommendationContext {
                k_anonymity: k,
                ..context(&[])
            };
            let recs = generate_recommendations(&ctx, 8);
            assert_eq!(recs.len(), 1, "k={}", k);
            assert!(recs[0].starts_with(prefix), "k={}: {}", k, recs[0]);
        }
    }

    #[test]
    fn test_overall_risk_bands() {
        let ctx = RecommendationContext {
            overall_risk: 0.75,
            ..context(&[])
        };
        let recs = generate_recommendations(&ctx, 8);
        assert_eq!(recs, vec![
            "Severe risk: 75.0% overall risk. Apply multiple privacy techniques immediately."
                .to_string()
        ]);

        let ctx = RecommendationContext {
            overall_risk: 0.3,
            ..context(&[])
        };
        assert!(generate_recommendations(&ctx, 8).is_empty());
    }

    #[test]
    fn test_field_rules_follow_qi_order() {
        let qi = vec![
            "Income_Bracket".to_string(),
            "Age".to_string(),
            "Work_Location".to_string(),
        ];
        let recs = generate_recommendations(&context(&qi), 8);

        assert_eq!(recs.len(), 3);
        assert!(recs[0].starts_with("Income field"));
        assert!(recs[1].starts_with("Age field"));
        assert!(recs[2].starts_with("Geographic field"));
    }

    #[test]
    fn test_city_column_gets_geographic_rule() {
        let recs = field_recommendations("Home_City");
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Geographic field 'Home_City'"));
    }

    #[test]
    fn test_full_rule_order_and_cap() {
        let qi = vec![
            "Age".to_string(),
            "District".to_string(),
            "Occupation".to_string(),
            "Education".to_string(),
        ];
        let ctx = RecommendationContext {
            dataset_size: 100,
            quasi_identifiers: &qi,
            k_anonymity: 1,
            overall_risk: 0.95,
            unique_records: 40,
            high_risk_records: 90,
        };

        let all = generate_recommendations(&ctx, usize::MAX);
        assert_eq!(all.len(), 9);
        assert!(all[0].starts_with("Critical"));
        assert!(all[1].starts_with("Severe risk"));
        assert!(all[6].starts_with("Unique records: 40 records (40.0%)"));
        assert!(all[7].starts_with("High-risk records: 90 records (90.0%)"));
        assert!(all[8].starts_with("Small dataset"));

        let capped = generate_recommendations(&ctx, 8);
        assert_eq!(capped.len(), 8);
        assert_eq!(capped[..], all[..8]);
    }

    #[test]
    fn test_high_risk_share_is_strictly_above_twenty_percent() {
        let ctx = RecommendationContext {
            high_risk_records: 1000,
            ..context(&[])
        };
        assert!(generate_recommendations(&ctx, 8).is_empty());

        let ctx = RecommendationContext {
            high_risk_records: 1001,
            ..context(&[])
        };
        assert_eq!(generate_recommendations(&ctx, 8).len(), 1);
    }
}
