use criterion::{criterion_group, criterion_main, Criterion};
use treestage::BTree;

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_1000_keys", |b| {
        b.iter(|| {
            let mut tree = BTree::new(3).unwrap();
            for i in 0..1000 {
                tree.insert((i * 2_654_435_761u64 % 1_000_003) as i32);
            }
            assert_eq!(tree.key_count(), 1000);
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let mut tree = BTree::new(3).unwrap();
    for i in 0..1000 {
        tree.insert(i);
    }

    c.bench_function("search_1000_keys", |b| {
        b.iter(|| {
            for i in 0..1000 {
                assert!(tree.contains(i));
            }
        });
    });
}

fn bench_erase_rebuild(c: &mut Criterion) {
    c.bench_function("erase_rebuild_1000_keys", |b| {
        b.iter(|| {
            let mut tree = BTree::new(3).unwrap();
            for i in 0..1000 {
                tree.insert(i);
            }
            // One erase rebuilds the whole tree from the log.
            assert!(tree.erase(500));
            assert_eq!(tree.key_count(), 999);
        });
    });
}

criterion_group!(benches, bench_insert, bench_search, bench_erase_rebuild);
criterion_main!(benches);
