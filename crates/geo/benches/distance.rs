//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pingrank_geo::{distances_from, haversine_distance, within_radius, Coordinate};

fn create_test_points(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            // Points in a grid around New York
            let lat = 40.0 + (i as f64 * 0.01) % 2.0;
            let lon = -74.0 + (i as f64 * 0.01) % 2.0;
            Coordinate::new(lat, lon)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let new_york = Coordinate::new(40.7128, -74.0060);
    let los_angeles = Coordinate::new(34.0522, -118.2437);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&new_york), black_box(&los_angeles)))
    });
}

fn bench_batch_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_distances");
    let origin = Coordinate::new(41.0, -73.5);

    for size in [10, 100, 1000, 10000].iter() {
        let points = create_test_points(*size);

        group.bench_with_input(BenchmarkId::new("distances_from", size), size, |b, _| {
            b.iter(|| distances_from(black_box(&origin), black_box(&points)))
        });

        group.bench_with_input(BenchmarkId::new("within_radius", size), size, |b, _| {
            b.iter(|| within_radius(black_box(&origin), black_box(&points), black_box(50.0)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_batch_distances);
criterion_main!(benches);
