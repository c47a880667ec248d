//! Benchmark for the term predicate engine — isolates the cost of each
//! clause family so regressions can be attributed to a specific predicate
//! rather than the conjunction as a whole.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use oeis_search::predicate::{
    is_bounded_subset, is_slice_of, ReferenceSet, TermOrder, TermQuery,
};

/// Synthetic term list shaped like real catalog data: mostly increasing
/// with occasional repeats.
fn make_terms(n: usize) -> Vec<i64> {
    (0..n).map(|i| (i as i64) - i64::from(i % 5 == 0)).collect()
}

fn bench_slice_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_slice_of");

    for &n in &[10_usize, 100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let haystack = make_terms(n);
            // Worst case: needle matches only at the very end.
            let needle = haystack[n - 3..].to_vec();
            b.iter(|| is_slice_of(black_box(&needle), black_box(&haystack)));
        });
    }

    group.finish();
}

fn bench_bounded_subset(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_subset");

    for &n in &[100_usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let reference = ReferenceSet::from_terms(&make_terms(n)).unwrap();
            // Every other candidate value sits above the cutoff.
            let view: Vec<i64> = (0..n as i64).map(|i| i * 2).collect();
            b.iter(|| is_bounded_subset(black_box(&view), black_box(&reference)));
        });
    }

    group.finish();
}

fn bench_full_conjunction(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_matches");

    for &n in &[10_usize, 100, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let terms = make_terms(n);
            let query = TermQuery {
                required: vec![terms[n / 2]],
                consecutive: terms[n - 2..].to_vec(),
                forbidden: vec![-100],
                lower: Some(-10),
                upper: Some(n as i64 + 10),
                order: TermOrder::NonDescending,
                ..TermQuery::default()
            };
            b.iter(|| query.matches(black_box(&terms)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_slice_search,
    bench_bounded_subset,
    bench_full_conjunction
);
criterion_main!(benches);
