//! Logging macros with deferred argument capture
//!
//! The macros never format on the calling thread: with arguments, each
//! one is captured by value into an [`ArgValue`](crate::ArgValue) and
//! rendering happens on the consumer; without arguments the template is
//! passed through as the final text.
//!
//! # Examples
//!
//! ```no_run
//! use shardlog::prelude::*;
//! use shardlog::{error, info};
//!
//! let mut consumers = 1;
//! let logger = start_logger("", &mut consumers, false);
//!
//! info!(logger, 0, "server started");
//!
//! let port = 8080;
//! error!(logger, 0, "bind failed on port {}", port);
//!
//! stop_logger(logger);
//! ```

/// Log to an explicit severity and shard.
///
/// # Examples
///
/// ```no_run
/// # use shardlog::prelude::*;
/// # let mut consumers = 1;
/// # let logger = start_logger("", &mut consumers, false);
/// use shardlog::log;
/// log!(logger, Severity::Info, 0, "plain message");
/// log!(logger, Severity::Error, 0, "code: {}", 500);
/// # stop_logger(logger);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $shard:expr, $template:expr $(,)?) => {
        $logger.log($level, $shard, $template)
    };
    ($logger:expr, $level:expr, $shard:expr, $template:expr, $($arg:expr),+ $(,)?) => {
        $logger.log_with(
            $level,
            $shard,
            $template,
            vec![$($crate::ArgValue::from($arg)),+],
        )
    };
}

/// Log an error-level record.
#[macro_export]
macro_rules! error {
    ($logger:expr, $shard:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $shard, $($arg)+)
    };
}

/// Log a warn-level record.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $shard:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $shard, $($arg)+)
    };
}

/// Log a fault-level record.
#[macro_export]
macro_rules! fault {
    ($logger:expr, $shard:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fault, $shard, $($arg)+)
    };
}

/// Log an info-level record.
#[macro_export]
macro_rules! info {
    ($logger:expr, $shard:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $shard, $($arg)+)
    };
}

/// Log a debug-level record.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $shard:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $shard, $($arg)+)
    };
}

/// Log a trace-level record.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $shard:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Trace, $shard, $($arg)+)
    };
}
