//! Benchmarks for menu and breadcrumb construction.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nav_core::{Depth, HierarchyWalker, MenuOptions, WalkerConfig};
use nav_store::{MemoryStore, PrefixMapper};

/// Create a tree with specified depth and breadth below `/site`.
fn create_tree(depth: usize, breadth: usize) -> MemoryStore {
    fn add_level(
        store: MemoryStore,
        id: &str,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
    ) -> MemoryStore {
        let mut store = store.with_node(id, [("label", format!("Level {current_depth}"))]);
        if current_depth == max_depth {
            return store;
        }
        for i in 0..breadth {
            store = add_level(
                store,
                &format!("{id}/section-{i}"),
                current_depth + 1,
                max_depth,
                breadth,
            );
        }
        store
    }

    add_level(MemoryStore::new(), "/site", 0, depth, breadth)
}

fn walker(depth: usize, breadth: usize, parallel: bool) -> HierarchyWalker {
    HierarchyWalker::new(
        Arc::new(create_tree(depth, breadth)),
        Arc::new(PrefixMapper::new("/site")),
        WalkerConfig {
            parallel,
            ..WalkerConfig::default()
        },
    )
    .unwrap()
}

fn bench_menu(c: &mut Criterion) {
    let walker = walker(4, 6, false);
    let active = "/section-0/section-1/section-2/section-3";

    let mut group = c.benchmark_group("menu");

    for depth in [0, 1, 2] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            let options = MenuOptions {
                depth: Depth::Levels(depth),
                include_root: false,
            };
            b.iter(|| walker.menu(active, options).unwrap());
        });
    }

    group.finish();
}

fn bench_sitemap(c: &mut Criterion) {
    let sequential = walker(4, 6, false);
    let parallel = walker(4, 6, true);

    let mut group = c.benchmark_group("sitemap");

    group.bench_function("sequential", |b| b.iter(|| sequential.sitemap().unwrap()));
    group.bench_function("parallel", |b| b.iter(|| parallel.sitemap().unwrap()));

    group.finish();
}

fn bench_ancestors(c: &mut Criterion) {
    let walker = walker(5, 3, false);

    let mut group = c.benchmark_group("ancestors");

    group.bench_function("depth_2", |b| {
        b.iter(|| walker.ancestors("/section-0/section-0").unwrap())
    });

    group.bench_function("depth_5", |b| {
        b.iter(|| {
            walker
                .ancestors("/section-0/section-0/section-0/section-0/section-0")
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_menu, bench_sitemap, bench_ancestors);
criterion_main!(benches);
