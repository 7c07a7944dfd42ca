//! Per-severity file sinks

use crate::core::error::{LoggerError, Result};
use crate::core::severity::{Severity, SEVERITY_COUNT};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appended to every sink file when it is opened, so restarts are
/// visible in the logs.
pub const SESSION_BANNER: &str = "\n\n-------------Starting new Session---------------\n\n";

/// One append-mode log file. Many consumers share a sink; the mutex
/// keeps each line a single uninterleaved write.
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open (creating if absent) in append mode and write the session
    /// banner.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::sink_io("opening", path.display().to_string(), e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(SESSION_BANNER.as_bytes())
            .map_err(|e| LoggerError::sink_io("writing banner to", path.display().to_string(), e))?;

        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    /// Append one line. The line must carry its own trailing newline.
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::sink_io("writing to", self.path.display().to_string(), e))
    }

    pub fn flush(&self) -> Result<()> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| LoggerError::sink_io("flushing", self.path.display().to_string(), e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data reaches disk
        let _ = self.flush();
    }
}

/// The six per-severity files, indexed by `Severity`.
///
/// Opening is best-effort: a sink that fails to open is reported on
/// stderr and left closed, and records routed to it are dropped by the
/// write attempt.
pub struct SinkSet {
    sinks: [Option<FileSink>; SEVERITY_COUNT],
    directory: PathBuf,
}

impl SinkSet {
    /// Resolve the log directory and open all six sinks.
    ///
    /// `directory_hint` is used when it names an existing directory;
    /// otherwise the current working directory is used. Files live in a
    /// `logs` subdirectory, created if absent.
    pub fn open(directory_hint: &Path) -> Self {
        let base = if directory_hint.is_dir() {
            directory_hint.to_path_buf()
        } else {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        };
        let directory = base.join("logs");
        if let Err(err) = fs::create_dir_all(&directory) {
            eprintln!(
                "shardlog: unable to create log directory '{}': {}",
                directory.display(),
                err
            );
        }

        let sinks = Severity::ALL.map(|level| {
            match FileSink::open(directory.join(level.file_name())) {
                Ok(sink) => Some(sink),
                Err(err) => {
                    eprintln!("shardlog: unable to open sink for {}: {}", level, err);
                    None
                }
            }
        });

        Self { sinks, directory }
    }

    /// Append a line to the sink for `level`.
    pub fn write(&self, level: Severity, line: &str) -> Result<()> {
        match &self.sinks[level.index()] {
            Some(sink) => sink.write_line(line),
            None => Err(LoggerError::SinkClosed {
                level: level.to_str(),
            }),
        }
    }

    /// Flush every open sink.
    pub fn flush_all(&self) {
        for sink in self.sinks.iter().flatten() {
            if let Err(err) = sink.flush() {
                eprintln!("shardlog: {}", err);
            }
        }
    }

    /// How many of the six files opened.
    pub fn open_count(&self) -> usize {
        self.sinks.iter().flatten().count()
    }

    /// The resolved `logs` directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
