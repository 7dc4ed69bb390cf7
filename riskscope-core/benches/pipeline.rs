//! Benchmarks for equivalence-class building and the full assessment.

#![allow(clippy::expect_used)]
#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use riskscope_core::risk::EquivalenceClasses;
use riskscope_core::{Dataset, RiskAnalyzer, Value};

const DISTRICTS: [&str; 6] = ["Pune", "Delhi", "Rural Satara", "Nagpur", "Leh", "Kochi"];
const OCCUPATIONS: [&str; 5] = ["Teacher", "Farmer", "Weaver", "Clerk", "Nurse"];

/// Deterministic synthetic survey of `rows` records.
fn survey(rows: usize) -> Dataset {
    let headers = ["Person_ID", "Age", "Gender", "District", "Occupation"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let records = (0..rows)
        .map(|i| {
            let i = i64::try_from(i).expect("row index fits in i64");
            let index = usize::try_from(i).expect("row index fits in usize");
            vec![
                Value::from(i),
                Value::from(18 + (i * 7) % 60),
                Value::from(if i % 2 == 0 { "F" } else { "M" }),
                Value::from(DISTRICTS[index % DISTRICTS.len()]),
                Value::from(OCCUPATIONS[(index / 3) % OCCUPATIONS.len()]),
            ]
        })
        .collect();
    Dataset::from_records(headers, records).expect("valid synthetic dataset")
}

fn bench_equivalence_classes(c: &mut Criterion) {
    let columns = vec![
        "Age".to_string(),
        "Gender".to_string(),
        "District".to_string(),
    ];
    let mut group = c.benchmark_group("equivalence_classes");
    for rows in [1_000, 10_000, 100_000] {
        let data = survey(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &data, |b, data| {
            b.iter(|| EquivalenceClasses::build(black_box(data), black_box(&columns)));
        });
    }
    group.finish();
}

fn bench_analyze_auto(c: &mut Criterion) {
    let analyzer = RiskAnalyzer::with_defaults();
    let data = survey(10_000);
    c.bench_function("analyze_auto_10k", |b| {
        b.iter(|| analyzer.analyze_auto(black_box(&data)));
    });
}

criterion_group!(benches, bench_equivalence_classes, bench_analyze_auto);
criterion_main!(benches);
