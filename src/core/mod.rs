//! Core pipeline types: records, queues, workers, and the façade

pub mod error;
pub mod logger;
pub mod queue;
pub mod record;
pub(crate) mod render;
pub mod severity;
pub(crate) mod worker;

pub use error::{LoggerError, Result};
pub use logger::{start_logger, stop_logger, Logger};
pub use queue::RecordQueue;
pub use record::{ArgValue, Record};
pub use severity::{Severity, SEVERITY_COUNT};
