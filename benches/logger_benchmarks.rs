//! Criterion benchmarks for shardlog
//!
//! The interesting number is producer-side latency: what a log call
//! costs the calling thread while the consumers do the rendering and
//! IO elsewhere.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use shardlog::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

fn bench_producer_latency(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let logger = Logger::new();
    logger.initialize(1, dir.path(), false);
    logger.start();

    let mut group = c.benchmark_group("producer_latency");
    group.throughput(Throughput::Elements(1));

    group.bench_function("static_template", |b| {
        b.iter(|| logger.log(Severity::Info, 0, black_box("BENCHMARK")));
    });

    group.bench_function("deferred_three_args", |b| {
        b.iter(|| {
            shardlog::log!(
                logger,
                Severity::Error,
                0,
                "LOGGING {} {} {}",
                black_box("BENCHMARK"),
                black_box(1),
                black_box(42.42)
            )
        });
    });

    group.bench_function("round_robin_levels", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let level = Severity::from_index(i % SEVERITY_COUNT).unwrap();
            i += 1;
            logger.log(level, 0, black_box("BENCHMARK"))
        });
    });

    group.finish();
    stop_logger(logger);
}

fn bench_multi_producer_throughput(c: &mut Criterion) {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 1_000;

    let dir = TempDir::new().unwrap();
    let logger = Arc::new(Logger::new());
    logger.initialize(PRODUCERS, dir.path(), false);
    logger.start();

    let mut group = c.benchmark_group("multi_producer");
    group.throughput(Throughput::Elements((PRODUCERS * PER_PRODUCER) as u64));

    group.bench_function("four_shards", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..PRODUCERS)
                .map(|shard| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        for i in 0..PER_PRODUCER {
                            shardlog::log!(
                                logger,
                                Severity::Info,
                                shard,
                                "LOGGING {} {} {}",
                                "BENCHMARK",
                                i,
                                42.42
                            );
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
    logger.stop();
}

criterion_group!(
    benches,
    bench_producer_latency,
    bench_multi_producer_throughput
);
criterion_main!(benches);
