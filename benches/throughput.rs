use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use std::time::Duration;
use tokio::runtime::Runtime;
use transaction_service::{Engine, SharedEngine, Transaction};

const NUM_TRANSACTIONS: i64 = 100_000;
const FAN_OUT: i64 = 8;

/// Every transaction `i > 0` hangs below `(i - 1) / FAN_OUT`, giving a balanced tree rooted at 0.
fn tree_transactions() -> Vec<Transaction> {
    (0..NUM_TRANSACTIONS)
        .map(|id| {
            let parent = if id == 0 { None } else { Some((id - 1) / FAN_OUT) };
            Transaction::new(id, 1.25, format!("type-{}", id % 16), parent)
        })
        .collect()
}

fn tree_engine() -> Engine {
    let mut engine = Engine::new();
    for transaction in tree_transactions() {
        engine.upsert(transaction);
    }
    engine
}

fn upserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("upsert");

    group.throughput(Throughput::Elements(NUM_TRANSACTIONS as u64));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(20);

    group.bench_function("sync_upsert_100K_transactions", |b| {
        b.iter_batched(
            tree_transactions,
            |transactions| {
                let mut engine = Engine::new();
                for transaction in transactions {
                    engine.upsert(transaction);
                }
                engine
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn subtree_sums(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_subtree");

    group.throughput(Throughput::Elements(NUM_TRANSACTIONS as u64));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(50);

    let engine = tree_engine();
    group.bench_function("sync_sum_100K_tree", |b| {
        b.iter(|| engine.sum_subtree(0).unwrap());
    });

    let mut chain = Engine::new();
    chain.upsert(Transaction::new(0, 1.0, "chain", None));
    for id in 1..transaction_service::DEFAULT_MAX_DEPTH as i64 {
        chain.upsert(Transaction::new(id, 1.0, "chain", Some(id - 1)));
    }
    group.bench_function("sync_sum_10K_chain", |b| {
        b.iter(|| chain.sum_subtree(0).unwrap());
    });

    let shared = SharedEngine::new(tree_engine());
    group.bench_function("async_sum_100K_tree", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt)
            .iter(|| async { shared.sum_subtree(0).await.unwrap() });
    });

    group.finish();
}

criterion_group!(benches, upserts, subtree_sums);
criterion_main!(benches);
