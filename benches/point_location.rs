//! Benchmarks for BVH construction and point-location queries.
//!
//! Two groups are measured:
//!
//! 1. **`bvh_build`**: Eager tree construction over grid meshes of
//!    increasing size, for both split strategies
//! 2. **`bvh_locate`**: Single-point queries against a built locator, with
//!    hits and misses measured separately

#![allow(missing_docs)] // Criterion macros generate undocumented functions

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pointloc::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const BENCH_SEED: u64 = 0xB14D;

/// Triangulates the `n x n` unit-cell grid, two triangles per cell.
fn grid_mesh(n: usize) -> (Vec<Point<f64, 2>>, Vec<[usize; 3]>) {
    let side = n + 1;
    let mut vertices = Vec::with_capacity(side * side);
    for j in 0..side {
        for i in 0..side {
            vertices.push(Point::new([i as f64, j as f64]));
        }
    }
    let mut simplices = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            let v00 = j * side + i;
            let v10 = v00 + 1;
            let v01 = v00 + side;
            let v11 = v01 + 1;
            simplices.push([v00, v10, v11]);
            simplices.push([v00, v11, v01]);
        }
    }
    (vertices, simplices)
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_build");
    for &n in &[8usize, 32, 64] {
        let (vertices, simplices) = grid_mesh(n);
        let nr_simplices = simplices.len();
        group.throughput(Throughput::Elements(nr_simplices as u64));

        for strategy in [SplitStrategy::Mean, SplitStrategy::Median] {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), nr_simplices),
                &strategy,
                |b, &strategy| {
                    b.iter(|| {
                        let locator: BvhLocator<f64, 2> = BvhLocator::new(
                            black_box(vertices.clone()),
                            black_box(&simplices),
                            BvhConfig::new(10, strategy),
                        )
                        .unwrap();
                        black_box(locator)
                    });
                },
            );
        }
    }
    group.finish();
}

fn benchmark_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_locate");
    for &n in &[8usize, 32, 64] {
        let (vertices, simplices) = grid_mesh(n);
        let nr_simplices = simplices.len();
        let locator: BvhLocator<f64, 2> =
            BvhLocator::new(vertices, &simplices, BvhConfig::default()).unwrap();

        let mut rng = StdRng::seed_from_u64(BENCH_SEED);
        let extent = n as f64;
        let hits: Vec<Point<f64, 2>> = (0..256)
            .map(|_| {
                Point::new([
                    rng.gen_range(0.0..extent),
                    rng.gen_range(0.0..extent),
                ])
            })
            .collect();
        let misses: Vec<Point<f64, 2>> = (0..256)
            .map(|_| {
                Point::new([
                    rng.gen_range(extent + 1.0..extent + 2.0),
                    rng.gen_range(0.0..extent),
                ])
            })
            .collect();

        group.throughput(Throughput::Elements(hits.len() as u64));
        group.bench_with_input(BenchmarkId::new("hit", nr_simplices), &hits, |b, hits| {
            b.iter(|| {
                for point in hits {
                    black_box(locator.locate(black_box(point)));
                }
            });
        });
        group.bench_with_input(
            BenchmarkId::new("miss", nr_simplices),
            &misses,
            |b, misses| {
                b.iter(|| {
                    for point in misses {
                        black_box(locator.locate(black_box(point)));
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_locate);
criterion_main!(benches);
