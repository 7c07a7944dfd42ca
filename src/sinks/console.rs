//! Colored stdout mirror

use crate::core::severity::Severity;
use colored::Colorize;
use std::io::Write;

/// Optional terminal sink: mirrors every line to stdout with the
/// severity's color.
pub struct ConsoleSink {
    stdout: std::io::Stdout,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
        }
    }

    /// Write a line (newline included) in the color mapped to `level`.
    pub fn write(&self, level: Severity, line: &str) {
        let painted = match level.background_code() {
            Some(bg) => line.color(level.color_code()).on_color(bg),
            None => line.color(level.color_code()),
        };
        let mut handle = self.stdout.lock();
        let _ = write!(handle, "{}", painted);
    }

    pub fn flush(&self) {
        let _ = self.stdout.lock().flush();
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}
