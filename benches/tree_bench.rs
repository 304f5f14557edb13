//! Balancing engine benchmarks

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use arbor_avl::AvlTree;

fn scrambled(n: u64) -> Vec<u64> {
    // Multiplicative hash keeps the sequence deterministic without a RNG.
    (0..n).map(|i| i.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 16).collect()
}

fn benchmark_insert(c: &mut Criterion) {
    c.bench_function("insert_sequential_n=10000", |b| {
        b.iter(|| {
            let tree: AvlTree<u64> = (0..10_000).collect();
            black_box(tree.height());
        });
    });

    let keys = scrambled(10_000);
    c.bench_function("insert_scrambled_n=10000", |b| {
        b.iter(|| {
            let tree: AvlTree<u64> = keys.iter().copied().collect();
            black_box(tree.height());
        });
    });
}

fn benchmark_delete(c: &mut Criterion) {
    let keys = scrambled(10_000);
    let base: AvlTree<u64> = keys.iter().copied().collect();

    c.bench_function("delete_half_n=10000", |b| {
        b.iter_batched(
            || base.clone(),
            |mut tree| {
                for key in keys.iter().step_by(2) {
                    tree.delete(key);
                }
                black_box(tree.len());
            },
            BatchSize::LargeInput,
        );
    });
}

fn benchmark_traverse(c: &mut Criterion) {
    let tree: AvlTree<u64> = scrambled(10_000).into_iter().collect();
    c.bench_function("traverse_n=10000", |b| {
        b.iter(|| black_box(tree.traverse().len()));
    });
}

criterion_group!(benches, benchmark_insert, benchmark_delete, benchmark_traverse);
criterion_main!(benches);
