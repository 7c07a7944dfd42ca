//! Logger façade and lifecycle
//!
//! One active `Logger` per process: the constructor takes a
//! process-wide activation token and `Drop` returns it, so the
//! singleton is a resettable handle rather than global mutable state.
//! Lifecycle: Idle → `initialize` → Initialized → `start` → Running →
//! `stop` → Idle, and a stopped logger may be initialized again.
//!
//! Only one controlling thread may drive the lifecycle; `log` may be
//! called from any number of producer threads while Running.

use crate::core::queue::RecordQueue;
use crate::core::record::{ArgValue, Record};
use crate::core::severity::Severity;
use crate::core::worker::{affinity_hint, Consumer, PipelineCounters, Shard};
use crate::sinks::{ConsoleSink, SinkSet};
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Process-wide activation token. Held from `Logger::new` until drop.
static ACTIVE: AtomicBool = AtomicBool::new(false);

pub struct Logger {
    initialized: AtomicBool,
    running: AtomicBool,
    consumer_count: AtomicUsize,
    stdout_enabled: AtomicBool,
    shards: RwLock<Vec<Arc<Shard>>>,
    sinks: RwLock<Option<Arc<SinkSet>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    counters: Arc<PipelineCounters>,
}

impl Logger {
    /// Create the process logger handle.
    ///
    /// # Panics
    ///
    /// Panics if another `Logger` is already active in this process.
    /// Drop (or `stop_logger`) the previous one first.
    #[must_use]
    pub fn new() -> Self {
        assert!(
            !ACTIVE.swap(true, Ordering::AcqRel),
            "another shardlog Logger is already active in this process"
        );
        Self {
            initialized: AtomicBool::new(false),
            running: AtomicBool::new(false),
            consumer_count: AtomicUsize::new(0),
            stdout_enabled: AtomicBool::new(false),
            shards: RwLock::new(Vec::new()),
            sinks: RwLock::new(None),
            workers: Mutex::new(Vec::new()),
            counters: Arc::new(PipelineCounters::default()),
        }
    }

    /// Open the sinks and allocate the shard array. Idempotent: when
    /// already initialized, returns the current consumer count
    /// unchanged.
    ///
    /// `consumers == 0` selects the host's available parallelism.
    /// `directory_hint` is used when it names an existing directory,
    /// otherwise the current working directory hosts the `logs`
    /// subdirectory. Returns the effective consumer count.
    pub fn initialize(
        &self,
        consumers: usize,
        directory_hint: impl AsRef<Path>,
        stdout_enabled: bool,
    ) -> usize {
        if self.initialized.load(Ordering::Acquire) {
            return self.consumer_count.load(Ordering::Acquire);
        }

        let count = if consumers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            consumers
        };

        *self.sinks.write() = Some(Arc::new(SinkSet::open(directory_hint.as_ref())));
        *self.shards.write() = (0..count).map(|_| Arc::new(Shard::new())).collect();
        self.stdout_enabled.store(stdout_enabled, Ordering::Release);
        self.consumer_count.store(count, Ordering::Release);
        self.initialized.store(true, Ordering::Release);
        count
    }

    /// Spawn the consumer workers and block until every worker has
    /// published its queue. Idempotent: a no-op unless the logger is
    /// Initialized and not yet Running.
    pub fn start(&self) {
        if self.running.load(Ordering::Acquire) || !self.initialized.load(Ordering::Acquire) {
            return;
        }
        let count = self.consumer_count.load(Ordering::Acquire);
        let sinks = match self.sinks.read().clone() {
            Some(sinks) => sinks,
            None => return,
        };
        let stdout_enabled = self.stdout_enabled.load(Ordering::Acquire);

        let mut spawned = vec![false; count];
        {
            let shards = self.shards.read();
            let mut workers = self.workers.lock();
            for (shard_id, shard) in shards.iter().enumerate() {
                let consumer = Consumer {
                    shard_id,
                    shard: Arc::clone(shard),
                    sinks: Arc::clone(&sinks),
                    console: stdout_enabled.then(ConsoleSink::new),
                    counters: Arc::clone(&self.counters),
                    cpu_hint: affinity_hint(shard_id, count),
                };
                let spawn = std::thread::Builder::new()
                    .name(format!("shardlog-consumer-{}", shard_id))
                    .spawn(move || consumer.run());
                match spawn {
                    Ok(handle) => {
                        workers.push(handle);
                        spawned[shard_id] = true;
                    }
                    Err(err) => {
                        eprintln!("shardlog: unable to spawn consumer {}: {}", shard_id, err)
                    }
                }
            }
        }

        // Producers are admitted only once every (spawned) worker has
        // published its queue.
        loop {
            let shards = self.shards.read();
            let all_published = shards
                .iter()
                .enumerate()
                .all(|(i, shard)| !spawned[i] || shard.queue.read().is_some());
            if all_published {
                break;
            }
            drop(shards);
            std::thread::yield_now();
        }

        self.running.store(true, Ordering::Release);
    }

    /// Enqueue a record with no format arguments. Returns `false`
    /// without enqueuing when the logger is not running, the shard is
    /// out of range, or the shard's worker has not published its queue.
    pub fn log(&self, level: Severity, shard: usize, template: impl Into<String>) -> bool {
        let Some(queue) = self.route(shard) else {
            return false;
        };
        queue.push(Record::eager(level, template));
        true
    }

    /// Enqueue a record with captured format arguments; rendering is
    /// deferred to the consumer. An empty argument list degrades to the
    /// eager path.
    pub fn log_with(
        &self,
        level: Severity,
        shard: usize,
        template: impl Into<String>,
        args: Vec<ArgValue>,
    ) -> bool {
        let Some(queue) = self.route(shard) else {
            return false;
        };
        let record = if args.is_empty() {
            Record::eager(level, template)
        } else {
            Record::deferred(level, template, args)
        };
        queue.push(record);
        true
    }

    fn route(&self, shard: usize) -> Option<Arc<RecordQueue>> {
        if !self.running.load(Ordering::Acquire) {
            return None;
        }
        let shards = self.shards.read();
        shards.get(shard)?.published_queue()
    }

    /// Drain and shut down: every record accepted before this call is
    /// written to its sink before `stop` returns. The logger is Idle
    /// afterwards and may be initialized again. A no-op when Idle.
    pub fn stop(&self) {
        if !self.initialized.load(Ordering::Acquire) {
            return;
        }

        // Reject new producers, then let the workers drain.
        self.running.store(false, Ordering::Release);
        for shard in self.shards.read().iter() {
            shard.terminate.store(true, Ordering::Release);
        }

        let handles: Vec<_> = self.workers.lock().drain(..).collect();
        for handle in handles {
            if handle.join().is_err() {
                eprintln!("shardlog: consumer worker panicked during shutdown");
            }
        }

        if let Some(sinks) = self.sinks.write().take() {
            sinks.flush_all();
        }
        self.shards.write().clear();
        self.consumer_count.store(0, Ordering::Release);
        self.initialized.store(false, Ordering::Release);
    }

    /// Effective consumer count; 0 while Idle.
    pub fn consumer_count(&self) -> usize {
        self.consumer_count.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// The resolved `logs` directory of the current session.
    pub fn log_directory(&self) -> Option<PathBuf> {
        self.sinks
            .read()
            .as_ref()
            .map(|sinks| sinks.directory().to_path_buf())
    }

    /// Records whose deferred rendering failed (written as sentinel
    /// lines).
    pub fn render_error_count(&self) -> u64 {
        self.counters.render_errors.load(Ordering::Relaxed)
    }

    /// Writes dropped because their sink never opened or the write
    /// failed.
    pub fn dropped_write_count(&self) -> u64 {
        self.counters.dropped_writes.load(Ordering::Relaxed)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.stop();
        ACTIVE.store(false, Ordering::Release);
    }
}

/// Start a logging session: create the handle, initialize, start.
/// `consumers` is rewritten to the effective count (`0` selects the
/// host's available parallelism).
pub fn start_logger(
    directory_hint: impl AsRef<Path>,
    consumers: &mut usize,
    stdout_enabled: bool,
) -> Logger {
    let logger = Logger::new();
    *consumers = logger.initialize(*consumers, directory_hint, stdout_enabled);
    logger.start();
    logger
}

/// Stop a logging session and release the process activation token.
pub fn stop_logger(logger: Logger) {
    logger.stop();
}
