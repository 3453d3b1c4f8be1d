//! Benchmarks for `RadixMap`: insert and get, single- and multi-threaded.
//!
//! ```bash
//! cargo bench --bench tree
//! ```

use divan::{Bencher, black_box};

use radixmap::{Keyed, RadixMap};

fn main() {
    divan::main();
}

const N: usize = 10_000;

struct Entry {
    id: u32,
    payload: u64,
}

impl Keyed for Entry {
    type Key = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Distinct pseudo-random ids (odd-constant multiply is a bijection).
fn ids(n: usize) -> Vec<u32> {
    (0..n as u32).map(|i| i.wrapping_mul(0x9E37_79B9)).collect()
}

fn setup(ids: &[u32]) -> RadixMap<Entry> {
    let tree = RadixMap::new();
    let guard = tree.guard();
    for &id in ids {
        let _ = tree.insert_with_guard(
            Box::new(Entry {
                id,
                payload: u64::from(id),
            }),
            &guard,
        );
    }
    drop(guard);
    tree
}

#[divan::bench]
fn insert_10k(bencher: Bencher) {
    let ids = ids(N);

    bencher.bench_local(|| {
        let tree = setup(&ids);
        black_box(tree.is_empty())
    });
}

#[divan::bench]
fn get_hit_10k(bencher: Bencher) {
    let ids = ids(N);
    let tree = setup(&ids);

    bencher.bench_local(|| {
        let guard = tree.guard();
        let mut sum = 0u64;
        for &id in &ids {
            if let Some(entry) = tree.get(id, &guard) {
                sum += entry.payload;
            }
        }
        black_box(sum)
    });
}

#[divan::bench]
fn get_miss_10k(bencher: Bencher) {
    let ids = ids(N);
    let tree = setup(&ids);

    bencher.bench_local(|| {
        let guard = tree.guard();
        let mut misses = 0usize;
        for &id in &ids {
            // The complement of a stored id is (almost) never stored.
            if tree.get(!id, &guard).is_none() {
                misses += 1;
            }
        }
        black_box(misses)
    });
}

#[divan::bench(threads = [2, 4, 8])]
fn get_concurrent(bencher: Bencher) {
    let ids = ids(N);
    let tree = setup(&ids);
    let ids = &ids;
    let tree = &tree;

    bencher.bench(|| {
        let guard = tree.guard();
        let mut sum = 0u64;
        for &id in ids.iter().take(1_000) {
            if let Some(entry) = tree.get(id, &guard) {
                sum += entry.payload;
            }
        }
        black_box(sum)
    });
}
