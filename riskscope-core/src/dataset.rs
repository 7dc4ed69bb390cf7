//! In-memory microdata container.
//!
//! A [`Dataset`] is produced by an ingestion collaborator and consumed
//! read-only by the risk engine. Cell values are modelled as a tagged
//! scalar so that stringification and the treatment of absent values are
//! defined once, here, instead of at every call site.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, RiskError};

/// A single cell value.
///
/// Serialized untagged: text as a JSON string, numbers as JSON numbers and
/// [`Value::Missing`] as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Textual value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Absent value
    #[default]
    Missing,
}

impl Value {
    /// Returns true for [`Value::Missing`] and the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Text(s) => s.is_empty(),
            Value::Number(_) => false,
        }
    }

    /// Returns the canonical string form of a non-empty value.
    ///
    /// Integral numbers print without a fractional part so that `25` read
    /// from a numeric column and `"25"` read from a text column compare
    /// equal. Empty values return `None`.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            Value::Text(s) if s.is_empty() => None,
            Value::Text(s) => Some(s.clone()),
            Value::Number(n) => Some(format_number(*n)),
        }
    }
}

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        // Normalizes -0.0 to 0 as well.
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Missing, Into::into)
    }
}

static MISSING: Value = Value::Missing;

/// A record: column name to cell value. Columns absent from the map are
/// treated exactly like [`Value::Missing`].
pub type Row = BTreeMap<String, Value>;

/// An ordered collection of records sharing one header list.
///
/// Invariants enforced at construction:
/// - header names are distinct
/// - every row's keys are a subset of the headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// Unvalidated wire form; deserialization goes through [`Dataset::new`].
#[derive(Deserialize)]
struct RawDataset {
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = RiskError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Self::new(raw.headers, raw.rows)
    }
}

impl Dataset {
    /// Creates a dataset, validating the header and row invariants.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(headers.len());
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(RiskError::invalid_dataset(format!(
                    "duplicate header '{}'",
                    header
                )));
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if let Some(stray) = row.keys().find(|key| !seen.contains(key.as_str())) {
                return Err(RiskError::invalid_dataset(format!(
                    "row {} has column '{}' which is not a header",
                    index, stray
                )));
            }
        }

        Ok(Self { headers, rows })
    }

    /// Creates a dataset from positional records.
    ///
    /// Records shorter than the header list leave the trailing columns
    /// absent; longer records are rejected.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<Value>>) -> Result<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if record.len() > headers.len() {
                return Err(RiskError::invalid_dataset(format!(
                    "record {} has {} fields but only {} headers",
                    index,
                    record.len(),
                    headers.len()
                )));
            }
            let row: Row = headers.iter().cloned().zip(record).collect();
            rows.push(row);
        }
        Self::new(headers, rows)
    }

    /// Returns the ordered column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the records.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if `column` is one of the headers.
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Iterates over one column's values, yielding [`Value::Missing`] for
    /// rows that do not carry the column.
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&MISSING))
    }
}
