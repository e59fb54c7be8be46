//! Performance benchmarks for freeze operations.
//!
//! Run with: cargo bench --package freeze

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use freeze::{Immutable, Replicate, RoutineCache};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Test data
// ============================================================================

#[derive(Debug, PartialEq, Replicate)]
struct Item {
    name: String,
    price: u64,
    tags: [Option<Box<String>>; 4],
}

#[derive(Debug, PartialEq, Replicate)]
struct Order {
    id: u64,
    customer: Rc<RefCell<String>>,
    items: Box<[Rc<RefCell<Item>>]>,
}

fn item(i: usize) -> Item {
    Item {
        name: format!("item_{i}"),
        price: i as u64 * 100,
        tags: [Some(Box::new("sale".into())), None, None, None],
    }
}

fn generate_order(num_items: usize) -> Order {
    Order {
        id: 7,
        customer: Rc::new(RefCell::new("customer".into())),
        items: (0..num_items)
            .map(|i| Rc::new(RefCell::new(item(i))))
            .collect(),
    }
}

// ============================================================================
// Benchmark: replicate with varying sizes
// ============================================================================

fn bench_replicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("replicate_order");

    for size in [1, 10, 100, 1000] {
        let order = generate_order(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &order, |b, order| {
            b.iter(|| black_box(order.replicate()))
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: routine cache
// ============================================================================

fn bench_routine_lookup(c: &mut Criterion) {
    let cache = RoutineCache::new();
    cache.routine::<Order>().unwrap();

    c.bench_function("routine_cache_hit", |b| {
        b.iter(|| black_box(cache.routine::<Order>().unwrap()))
    });

    c.bench_function("routine_compile", |b| {
        b.iter(|| black_box(freeze::compile::<Order>(cache.config()).unwrap()))
    });
}

// ============================================================================
// Benchmark: immutable operations
// ============================================================================

fn bench_immutable(c: &mut Criterion) {
    let mut group = c.benchmark_group("immutable");
    let cache = RoutineCache::new();

    group.bench_function("wrap_100", |b| {
        b.iter(|| black_box(Immutable::with_cache(generate_order(100), &cache).unwrap()))
    });

    let wrapper = Immutable::with_cache(generate_order(100), &cache).unwrap();

    group.bench_function("emit_100", |b| b.iter(|| black_box(wrapper.emit())));

    group.bench_function("extract_value_100", |b| {
        b.iter(|| black_box(wrapper.extract(|order| order.items.len()).unwrap()))
    });

    group.bench_function("value_member", |b| {
        b.iter(|| black_box(wrapper.value::<u64>("id").unwrap()))
    });

    group.bench_function("array_member_100", |b| {
        b.iter(|| {
            black_box(
                wrapper
                    .array::<Rc<RefCell<Item>>>("items")
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_replicate, bench_routine_lookup, bench_immutable);
criterion_main!(benches);
