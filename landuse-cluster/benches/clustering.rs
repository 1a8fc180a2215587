//! Criterion benchmarks for haversine DBSCAN.
//!
//! Compares the R\*-tree and exhaustive neighbour searches across input
//! sizes on a deterministic, clustered point set.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package landuse-cluster
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use landuse_cluster::{DbscanClusterer, ExhaustiveNeighbours};
use landuse_core::{ClusterParams, ClusterPoint, Clusterer};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic point generation.
const BENCHMARK_SEED: u64 = 42;

/// Input sizes to benchmark.
const PROBLEM_SIZES: &[u64] = &[250, 1_000, 4_000];

/// Number of dense centres in the generated area.
const CENTRE_COUNT: usize = 8;

/// Spread around each centre in degrees (~200 m).
const CENTRE_SPREAD: f64 = 0.002;

/// Generate `count` points scattered around a few centres near Delhi.
fn generate_points(count: u64, seed: u64) -> Vec<ClusterPoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let centres: Vec<(f64, f64)> = (0..CENTRE_COUNT)
        .map(|_| (rng.gen_range(77.0..77.3), rng.gen_range(28.5..28.8)))
        .collect();
    (0..count)
        .zip(centres.iter().cycle())
        .map(|(id, &(lon, lat))| {
            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let point = ClusterPoint::new(
                id,
                lon + rng.gen_range(-CENTRE_SPREAD..CENTRE_SPREAD),
                lat + rng.gen_range(-CENTRE_SPREAD..CENTRE_SPREAD),
            );
            point
        })
        .collect()
}

fn bench_neighbour_searches(c: &mut Criterion) {
    let mut group = c.benchmark_group("dbscan");
    let params = ClusterParams::default();
    let tree = DbscanClusterer::new();
    let exhaustive = DbscanClusterer::with_search(ExhaustiveNeighbours);

    for &size in PROBLEM_SIZES {
        let points = generate_points(size, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("rtree", size), &points, |b, points| {
            b.iter(|| tree.partition(points, &params));
        });
        group.bench_with_input(BenchmarkId::new("exhaustive", size), &points, |b, points| {
            b.iter(|| exhaustive.partition(points, &params));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_neighbour_searches);
criterion_main!(benches);
