//! Producer-latency firehose
//!
//! Spawns one producer per shard, each pushing argument-bearing records
//! across all six severities as fast as it can, and reports the average
//! producer-side cost per call. A port of the classic log-library
//! micro-benchmark loop.
//!
//! Run with: cargo run --release --example firehose

use shardlog::prelude::*;
use std::sync::Arc;
use std::time::Instant;

const ITERS: usize = 100_000;

fn producer(logger: &Logger, shard: usize) {
    let begin = Instant::now();
    for i in 0..ITERS {
        let level = Severity::from_index(i % SEVERITY_COUNT).unwrap();
        let accepted = shardlog::log!(
            logger,
            level,
            shard,
            "LOGGING {} {} {}",
            "BENCHMARK",
            i + 1,
            42.42
        );
        if !accepted {
            println!("unable to log {}!", i);
        }
    }
    let elapsed = begin.elapsed();
    println!(
        "\tshard {}: average latency = {} ns",
        shard,
        elapsed.as_nanos() as usize / ITERS
    );
}

fn run(producers: usize) {
    println!("\nproducers/consumers: {}", producers);
    let begin = Instant::now();

    let mut consumers = producers;
    let logger = Arc::new(start_logger("", &mut consumers, false));

    let handles: Vec<_> = (0..producers)
        .map(|shard| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || producer(&logger, shard))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    logger.stop();
    println!("total wall time: {:?}", begin.elapsed());
}

fn main() {
    for producers in [1, 2, 4] {
        run(producers);
    }
}
