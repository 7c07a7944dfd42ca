//! Output sinks: per-severity files and the optional colored terminal

pub mod console;
pub mod file;

pub use console::ConsoleSink;
pub use file::{FileSink, SinkSet, SESSION_BANNER};
