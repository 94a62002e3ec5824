//! # Classification Benchmarks
//!
//! Performance benchmarks for stdrev-core classification.
//!
//! Run with: `cargo bench -p stdrev-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use stdrev_core::primitives::{CPLUSPLUS, EMBEDDED_CPLUSPLUS, STDC, STDC_HOSTED};
use stdrev_core::{Classifier, LanguageFamily, QuirksTable, SignalSnapshot, classify};

/// Snapshots exercising each resolution path.
fn sample_snapshots() -> Vec<(&'static str, SignalSnapshot, LanguageFamily)> {
    vec![
        (
            "c_base_only",
            SignalSnapshot::new().with_presence(STDC),
            LanguageFamily::C,
        ),
        (
            "c_hosted_token",
            SignalSnapshot::new()
                .with_presence(STDC)
                .with_presence(STDC_HOSTED)
                .with_version_token(199_409),
            LanguageFamily::C,
        ),
        (
            "cpp_token",
            SignalSnapshot::new()
                .with_presence(CPLUSPLUS)
                .with_version_token(201_703),
            LanguageFamily::Cpp,
        ),
        (
            "cpp_vendor_quirk",
            SignalSnapshot::new()
                .with_version_token(199_710)
                .with_vendor("hp-acc"),
            LanguageFamily::Cpp,
        ),
        (
            "cpp_embedded",
            SignalSnapshot::new()
                .with_presence(CPLUSPLUS)
                .with_dialect(EMBEDDED_CPLUSPLUS),
            LanguageFamily::Cpp,
        ),
    ]
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_classify_builtin(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_builtin");

    for (name, snapshot, family) in sample_snapshots() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &snapshot, |b, snapshot| {
            b.iter(|| black_box(classify(snapshot, family)));
        });
    }

    group.finish();
}

fn bench_classify_large_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_large_table");

    for size in [10usize, 100, 1000].iter() {
        let mut table = QuirksTable::builtin();
        for i in 0..*size {
            let mut dialect = table.dialects[0].clone();
            dialect.name = format!("synthetic-{i}");
            dialect.indicator = stdrev_core::Indicator::new(format!("__SYNTHETIC_{i}__"));
            table.dialects.push(dialect);
        }
        let classifier = Classifier::new(table);
        let snapshot = SignalSnapshot::new()
            .with_presence(CPLUSPLUS)
            .with_version_token(202_002)
            .with_dialect(EMBEDDED_CPLUSPLUS);

        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(classifier.classify(snapshot, LanguageFamily::Cpp)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify_builtin, bench_classify_large_table);

criterion_main!(benches);
