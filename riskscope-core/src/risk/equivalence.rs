//! Equivalence-class construction.
//!
//! Rows are grouped by the tuple of their values across the selected
//! quasi-identifier columns. Keys are structured tuples rather than joined
//! strings, so a value containing any would-be delimiter cannot make two
//! different tuples collide, and an absent value is a dedicated key part
//! that no real value can equal.

use std::collections::BTreeMap;
use std::fmt;

use crate::dataset::{Dataset, Row};
use crate::{Result, RiskError};

/// One component of an equivalence-class key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyPart {
    /// Canonical string form of a non-empty value
    Value(String),
    /// Absent or empty value
    Missing,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Value(v) => write!(f, "{:?}", v),
            KeyPart::Missing => f.write_str("<missing>"),
        }
    }
}

/// Composite key: one part per QI column, in selection order.
pub type ClassKey = Vec<KeyPart>;

/// Class sizes keyed by composite QI value.
///
/// Iteration is in key order, so two builds over the same rows produce
/// identical sequences regardless of row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceClasses {
    columns: Vec<String>,
    classes: BTreeMap<ClassKey, usize>,
}

impl EquivalenceClasses {
    /// Creates an empty class map over the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            classes: BTreeMap::new(),
        }
    }

    /// Builds classes over `columns` for every row of the dataset.
    ///
    /// Fails with [`RiskError::UnknownColumn`] if a column is not a header.
    /// An empty column list places every row in a single class.
    pub fn build(dataset: &Dataset, columns: &[String]) -> Result<Self> {
        Self::build_rows(dataset, columns, dataset.rows())
    }

    /// Builds classes over a slice of the dataset's rows.
    ///
    /// Partial results built from disjoint slices can be combined with
    /// [`EquivalenceClasses::merge`].
    pub fn build_rows(dataset: &Dataset, columns: &[String], rows: &[Row]) -> Result<Self> {
        if let Some(unknown) = columns.iter().find(|c| !dataset.has_column(c)) {
            return Err(RiskError::unknown_column(unknown.as_str()));
        }

        let mut classes = Self::new(columns.to_vec());
        for row in rows {
            classes.insert(class_key(row, columns));
        }

        tracing::debug!(
            "Built {} equivalence classes over {} rows using {} columns",
            classes.len(),
            rows.len(),
            columns.len()
        );
        Ok(classes)
    }

    fn insert(&mut self, key: ClassKey) {
        *self.classes.entry(key).or_insert(0) += 1;
    }

    /// Adds the counts of `other` into `self`, key by key.
    ///
    /// Both maps must have been built over the same columns.
    pub fn merge(&mut self, other: Self) -> Result<()> {
        if self.columns != other.columns {
            return Err(RiskError::configuration(format!(
                "cannot merge classes over [{}] into classes over [{}]",
                other.columns.join(", "),
                self.columns.join(", ")
            )));
        }
        for (key, size) in other.classes {
            *self.classes.entry(key).or_insert(0) += size;
        }
        Ok(())
    }

    /// Columns the keys were built over.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of equivalence classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if there are no classes (no rows were seen).
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Size of the class with the given key, if present.
    pub fn size_of(&self, key: &[KeyPart]) -> Option<usize> {
        self.classes.get(key).copied()
    }

    /// Iterates over class sizes in key order.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.classes.values().copied()
    }

    /// Iterates over `(key, size)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClassKey, usize)> + '_ {
        self.classes.iter().map(|(k, v)| (k, *v))
    }

    /// Total rows across all classes.
    pub fn total_records(&self) -> usize {
        self.classes.values().sum()
    }
}

fn class_key(row: &Row, columns: &[String]) -> ClassKey {
    columns
        .iter()
        .map(|column| {
            row.get(column)
                .and_then(|value| value.as_key())
                .map_or(KeyPart::Missing, KeyPart::Value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn dataset(headers: &[&str], records: Vec<Vec<Value>>) -> Dataset {
        Dataset::from_records(columns(headers), records).unwrap()
    }

    #[test]
    fn test_classes_by_district() {
        let mut records = vec![vec![Value::from("Delhi")]; 8];
        records.extend(vec![vec![Value::from("Pune")]; 2]);
        let data = dataset(&["District"], records);

        let classes = EquivalenceClasses::build(&data, &columns(&["District"])).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(
            classes.size_of(&[KeyPart::Value("Delhi".to_string())]),
            Some(8)
        );
        assert_eq!(
            classes.size_of(&[KeyPart::Value("Pune".to_string())]),
            Some(2)
        );
        assert_eq!(classes.total_records(), 10);
    }

    #[test]
    fn test_iter_is_in_key_order() {
        let data = dataset(
            &["District"],
            vec![
                vec![Value::from("Pune")],
                vec![Value::Missing],
                vec![Value::from("Delhi")],
                vec![Value::from("Pune")],
            ],
        );

        let classes = EquivalenceClasses::build(&data, &columns(&["District"])).unwrap();
        let pairs: Vec<(String, usize)> = classes
            .iter()
            .map(|(key, size)| (key[0].to_string(), size))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("\"Delhi\"".to_string(), 1),
                ("\"Pune\"".to_string(), 2),
                ("<missing>".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_empty_selection_single_class() {
        let data = dataset(&["Age"], vec![vec![Value::from(1_i64)]; 4]);
        let classes = EquivalenceClasses::build(&data, &[]).unwrap();

        assert_eq!(classes.len(), 1);
        assert_eq!(classes.size_of(&[]), Some(4));
    }

    #[test]
    fn test_empty_dataset_has_no_classes() {
        let data = dataset(&["Age"], vec![]);
        let classes = EquivalenceClasses::build(&data, &columns(&["Age"])).unwrap();
        assert!(classes.is_empty());
        assert_eq!(classes.total_records(), 0);
    }

    #[test]
    fn test_unknown_column_fails_fast() {
        let data = dataset(&["Age"], vec![vec![Value::from(1_i64)]]);
        let error = EquivalenceClasses::build(&data, &columns(&["Age", "Caste"])).unwrap_err();
        assert!(matches!(error, RiskError::UnknownColumn { ref column } if column == "Caste"));
    }

    #[test]
    fn test_delimiter_values_do_not_collide() {
        // A joined "a|b" + "c" key would equal "a" + "b|c".
        let data = dataset(
            &["X", "Y"],
            vec![
                vec![Value::from("a|b"), Value::from("c")],
                vec![Value::from("a"), Value::from("b|c")],
            ],
        );

        let classes = EquivalenceClasses::build(&data, &columns(&["X", "Y"])).unwrap();
        assert_eq!(classes.len(), 2);
        assert!(classes.sizes().all(|size| size == 1));
    }

    #[test]
    fn test_missing_is_distinct_from_any_value() {
        let data = dataset(
            &["Occupation"],
            vec![
                vec![Value::Missing],
                vec![Value::from("")],
                vec![Value::from("NULL")],
                vec![Value::from("<missing>")],
            ],
        );

        let classes = EquivalenceClasses::build(&data, &columns(&["Occupation"])).unwrap();
        // Missing and "" share the sentinel; the literal strings do not.
        assert_eq!(classes.size_of(&[KeyPart::Missing]), Some(2));
        assert_eq!(classes.len(), 3);
    }

    #[test]
    fn test_numbers_and_text_share_canonical_form() {
        let data = dataset(
            &["Age"],
            vec![vec![Value::from(30_i64)], vec![Value::from("30")]],
        );
        let classes = EquivalenceClasses::build(&data, &columns(&["Age"])).unwrap();
        assert_eq!(classes.len(), 1);
    }

    #[test]
    fn test_merge_partitions_equals_whole() {
        let data = dataset(
            &["Gender", "District"],
            vec![
                vec![Value::from("M"), Value::from("Pune")],
                vec![Value::from("F"), Value::from("Pune")],
                vec![Value::from("M"), Value::from("Pune")],
                vec![Value::from("M"), Value::Missing],
                vec![Value::from("F"), Value::from("Delhi")],
            ],
        );
        let qi = columns(&["Gender", "District"]);

        let whole = EquivalenceClasses::build(&data, &qi).unwrap();
        let (left, right) = data.rows().split_at(2);
        let mut merged = EquivalenceClasses::build_rows(&data, &qi, right).unwrap();
        merged
            .merge(EquivalenceClasses::build_rows(&data, &qi, left).unwrap())
            .unwrap();

        assert_eq!(merged, whole);
    }

    #[test]
    fn test_merge_rejects_different_columns() {
        let mut a = EquivalenceClasses::new(columns(&["Age"]));
        let b = EquivalenceClasses::new(columns(&["Gender"]));
        assert!(a.merge(b).is_err());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(KeyPart::Value("a|b".to_string()).to_string(), "\"a|b\"");
        assert_eq!(KeyPart::Missing.to_string(), "<missing>");
    }
}
