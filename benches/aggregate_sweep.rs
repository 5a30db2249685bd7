//! Aggregation sweep benchmark
//!
//! Measures the mean-curve sweep over many normalized series, both on its own
//! and through the full per-pair normalization plus aggregation path.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench aggregate_sweep
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cotejo::normalize::{
    aggregate_series, normalize_pair, AggregateCurve, CompareConfig, NormalizedPoint,
};
use cotejo::pairing::Pair;
use cotejo::record::{HistoryPoint, NormalRun};

/// Deterministic improving history with `len` points
fn bench_history(seed: usize, len: usize) -> Vec<HistoryPoint> {
    (0..len)
        .map(|i| {
            let at = (i as f64) * 0.5 + (seed % 7) as f64 * 0.1;
            let value = 1000.0 / (1.0 + i as f64) + (seed % 13) as f64;
            HistoryPoint::measured(value, at)
        })
        .collect()
}

fn bench_pair(seed: usize, len: usize) -> Pair {
    let name = format!("instance_{seed}");
    Pair {
        instance_name: name.clone(),
        a: NormalRun::new(
            &name,
            600.0,
            bench_history(seed, len),
            bench_history(seed + 1, len / 2),
        ),
        b: NormalRun::new(&name, 600.0, bench_history(seed + 3, len), vec![]),
    }
}

fn bench_aggregate_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_series");

    for instances in [10usize, 100, 1000] {
        let sequences: Vec<Vec<NormalizedPoint>> = (0..instances)
            .map(|seed| {
                bench_history(seed, 50)
                    .iter()
                    .filter_map(|p| {
                        p.value
                            .as_f64()
                            .map(|v| NormalizedPoint::new(v / 100.0, p.at_seconds))
                    })
                    .collect()
            })
            .collect();
        let slices: Vec<&[NormalizedPoint]> = sequences.iter().map(|s| s.as_slice()).collect();

        group.bench_with_input(BenchmarkId::from_parameter(instances), &slices, |b, slices| {
            b.iter(|| aggregate_series(black_box(slices), 10.0, 1.0));
        });
    }

    group.finish();
}

fn bench_full_curve(c: &mut Criterion) {
    let config = CompareConfig::default();
    let pairs: Vec<Pair> = (0..200).map(|seed| bench_pair(seed, 40)).collect();

    c.bench_function("normalize_and_aggregate_200_pairs", |b| {
        b.iter(|| {
            let normalized: Vec<_> = pairs
                .iter()
                .filter_map(|p| normalize_pair(black_box(p), &config).ok())
                .collect();
            AggregateCurve::from_pairs(&normalized, &config)
        });
    });
}

criterion_group!(benches, bench_aggregate_series, bench_full_curve);
criterion_main!(benches);
