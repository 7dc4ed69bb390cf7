//! CSV ingestion and configuration loading.
//!
//! The first record is the header row. Each cell becomes a
//! [`Value`]: blank cells are missing, plain decimal numbers are numeric and
//! everything else is text. Codes with leading zeros ("007", "0451") stay
//! text so they keep their exact spelling.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use riskscope_core::{Dataset, Result, RiskConfig, RiskError, Value};

/// Loads a [`RiskConfig`] from a JSON file.
///
/// Missing keys take their defaults. The result is not validated here;
/// `RiskAnalyzer::new` does that once CLI overrides are applied.
pub fn load_config(path: &Path) -> Result<RiskConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| RiskError::io(format!("Failed to read config {}", path.display()), e))?;
    serde_json::from_str(&contents).map_err(|e| {
        RiskError::serialization(format!("Invalid config file {}", path.display()), e)
    })
}

/// Loads a dataset from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path)
        .map_err(|e| RiskError::io(format!("Failed to open {}", path.display()), e))?;
    let dataset = read_csv(file)?;
    tracing::info!(
        "Loaded {} rows and {} columns from {}",
        dataset.len(),
        dataset.headers().len(),
        path.display()
    );
    Ok(dataset)
}

/// Reads a dataset from any CSV source.
///
/// Records shorter than the header row leave their trailing columns
/// absent. Records longer than the header row are rejected.
pub fn read_csv<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| RiskError::csv("Failed to read header row", e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| RiskError::csv(format!("Failed to read record {}", index + 1), e))?;
        records.push(record.iter().map(parse_cell).collect());
    }

    Dataset::from_records(headers, records)
}

/// Converts one trimmed CSV cell into a value.
pub fn parse_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Missing;
    }
    if has_leading_zero(cell) {
        return Value::Text(cell.to_string());
    }
    match cell.parse::<f64>() {
        Ok(n) if n.is_finite() && is_decimal_literal(cell) => Value::Number(n),
        _ => Value::Text(cell.to_string()),
    }
}

fn has_leading_zero(cell: &str) -> bool {
    let digits = cell.strip_prefix('-').unwrap_or(cell);
    let mut chars = digits.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('0'), Some(c)) if c.is_ascii_digit()
    )
}

/// Rejects spellings f64 parsing accepts but a survey export never means
/// as a number ("inf", "1e5", "+3").
fn is_decimal_literal(cell: &str) -> bool {
    let body = cell.strip_prefix('-').unwrap_or(cell);
    !body.is_empty()
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.chars().filter(|&c| c == '.').count() <= 1
        && body.chars().any(|c| c.is_ascii_digit())
}
