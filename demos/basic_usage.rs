//! Basic logging session
//!
//! Demonstrates the lifecycle, plain and argument-bearing log calls,
//! and the colored stdout mirror.
//!
//! Run with: cargo run --example basic_usage

use shardlog::prelude::*;

fn main() {
    println!("=== shardlog - Basic Usage ===\n");

    // one consumer, log files under ./logs, mirror to stdout
    let mut consumers = 1;
    let logger = start_logger("", &mut consumers, true);
    println!("running with {} consumer(s)\n", consumers);

    // one line per severity file
    shardlog::error!(logger, 0, "connection lost to {}", "db-primary");
    shardlog::warn!(logger, 0, "retry {} of {}", 1, 3);
    shardlog::fault!(logger, 0, "checksum mismatch in segment {}", 7);
    shardlog::info!(logger, 0, "service listening on port {}", 8080);
    shardlog::debug!(logger, 0, "cache warm in {} ms", 12);
    shardlog::trace!(logger, 0, "tick");

    // a template with no arguments skips deferred rendering entirely
    logger.log(Severity::Info, 0, "static line, no formatting work");

    stop_logger(logger);
    println!("\nall records drained; see the logs/ directory");
}
