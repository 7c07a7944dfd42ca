//! # shardlog
//!
//! Sharded asynchronous logging for multi-threaded applications.
//!
//! ## Features
//!
//! - **Non-blocking producers**: a log call is a timestamp capture, an
//!   argument capture, and a lock-free queue push
//! - **Deferred formatting**: templates render on the consumer thread,
//!   off the hot path
//! - **Per-severity files**: six append-mode log files plus an optional
//!   colored stdout mirror
//! - **Lossless shutdown**: `stop` drains every accepted record before
//!   returning, and the logger can be re-initialized afterwards
//!
//! ## Usage
//!
//! Producers pick a shard in `[0, consumer_count)`; records on the same
//! shard from the same thread keep their order, shards are otherwise
//! independent.
//!
//! ```no_run
//! use shardlog::prelude::*;
//!
//! let mut consumers = 4;
//! let logger = start_logger("/var/tmp", &mut consumers, false);
//!
//! logger.log(Severity::Info, 0, "static line");
//! shardlog::info!(logger, 1, "answer is {}", 42);
//!
//! stop_logger(logger);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        start_logger, stop_logger, ArgValue, Logger, LoggerError, Record, Result, Severity,
        SEVERITY_COUNT,
    };
    pub use crate::sinks::SESSION_BANNER;
}

pub use crate::core::{
    start_logger, stop_logger, ArgValue, Logger, LoggerError, Record, RecordQueue, Result,
    Severity, SEVERITY_COUNT,
};
pub use crate::sinks::{ConsoleSink, FileSink, SinkSet, SESSION_BANNER};
