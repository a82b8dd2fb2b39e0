//! Criterion benchmarks for the two traversal styles.
//!
//! Run with:
//! ```bash
//! cargo bench --bench traversal_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use treebench::{Strategy, TreeBuilder};

const THRESHOLD: i64 = 80;

// ── find ─────────────────────────────────────────────────────────────────────

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal/find");
    let mut builder = TreeBuilder::with_seed(42);

    for &n in &[2_000usize, 20_000, 200_000] {
        let tree = builder.build(n).unwrap();
        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.label(), n), &tree, |b, tree| {
                b.iter(|| strategy.find(black_box(THRESHOLD), black_box(tree)))
            });
        }
    }

    group.finish();
}

// ── build ────────────────────────────────────────────────────────────────────

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder/build");

    for &n in &[2_000usize, 200_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut builder = TreeBuilder::with_seed(7);
            b.iter(|| builder.build(black_box(n)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find, bench_build);
criterion_main!(benches);
