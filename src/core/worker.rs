//! Consumer workers
//!
//! One worker per shard. A worker constructs its queue, publishes it
//! into the shard slot (observable by `start`'s wait and by producers),
//! then drains: pop, render, write. It exits only when the terminate
//! flag is set and a pop comes back empty, so every record accepted
//! before shutdown began is written first.

use crate::core::queue::RecordQueue;
use crate::core::record::Record;
use crate::sinks::{ConsoleSink, SinkSet};
use chrono::{Datelike, Timelike};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Consecutive empty polls before the drain loop yields the CPU. Keeps
/// the pop latency of a busy queue while capping idle burn; shutdown is
/// delayed by at most one yield.
const YIELD_AFTER_EMPTY_POLLS: u32 = 64;

/// Per-consumer shared state: the published queue slot and the
/// terminate flag.
pub(crate) struct Shard {
    /// Empty until the worker publishes its queue on entry; empty again
    /// after the worker clears it on exit.
    pub(crate) queue: RwLock<Option<Arc<RecordQueue>>>,
    /// Raised once by `stop`, read by the worker.
    pub(crate) terminate: AtomicBool,
}

impl Shard {
    pub(crate) fn new() -> Self {
        Self {
            queue: RwLock::new(None),
            terminate: AtomicBool::new(false),
        }
    }

    pub(crate) fn published_queue(&self) -> Option<Arc<RecordQueue>> {
        self.queue.read().clone()
    }
}

/// Counters shared between the façade and its workers.
#[derive(Default)]
pub(crate) struct PipelineCounters {
    pub(crate) render_errors: AtomicU64,
    pub(crate) dropped_writes: AtomicU64,
}

pub(crate) struct Consumer {
    pub(crate) shard_id: usize,
    pub(crate) shard: Arc<Shard>,
    pub(crate) sinks: Arc<SinkSet>,
    pub(crate) console: Option<ConsoleSink>,
    pub(crate) counters: Arc<PipelineCounters>,
    /// Advisory CPU hint; applied only under the `affinity` feature on
    /// Linux.
    pub(crate) cpu_hint: usize,
}

impl Consumer {
    pub(crate) fn run(self) {
        apply_affinity_hint(self.cpu_hint);

        let queue = Arc::new(RecordQueue::new());
        *self.shard.queue.write() = Some(Arc::clone(&queue));

        let mut empty_polls = 0u32;
        loop {
            match queue.try_pop() {
                Some(record) => {
                    empty_polls = 0;
                    self.emit(record);
                }
                None => {
                    if self.shard.terminate.load(Ordering::Acquire) {
                        break;
                    }
                    empty_polls += 1;
                    if empty_polls >= YIELD_AFTER_EMPTY_POLLS {
                        empty_polls = 0;
                        std::thread::yield_now();
                    }
                }
            }
        }

        *self.shard.queue.write() = None;
        if let Some(console) = &self.console {
            console.flush();
        }
    }

    fn emit(&self, mut record: Record) {
        if record.render().is_err() {
            self.counters.render_errors.fetch_add(1, Ordering::Relaxed);
        }
        let line = format_line(&record, self.shard_id);
        if self.sinks.write(record.level, &line).is_err() {
            self.counters.dropped_writes.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(console) = &self.console {
            console.write(record.level, &line);
        }
    }
}

/// `<y>-<m>-<d> <H>:<M>:<S>.<ns>\t\tThread ID : <shard>\t<message>\n`
///
/// Calendar fields are decimal without zero padding, matching the
/// historical on-disk format.
pub(crate) fn format_line(record: &Record, shard: usize) -> String {
    let ts = &record.timestamp;
    format!(
        "{}-{}-{} {}:{}:{}.{}\t\tThread ID : {}\t{}\n",
        ts.year(),
        ts.month(),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second(),
        ts.nanosecond(),
        shard,
        record.message()
    )
}

/// Scheduling hint for worker `shard`. Collisions are expected; the
/// hint only spreads workers over the lower cores and carries no
/// correctness weight.
pub(crate) fn affinity_hint(shard: usize, consumer_count: usize) -> usize {
    shard % (consumer_count / 2).max(1) + 1
}

#[cfg(all(feature = "affinity", target_os = "linux"))]
fn apply_affinity_hint(cpu: usize) {
    unsafe {
        let mut set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(cpu, &mut set);
        libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set);
    }
}

#[cfg(not(all(feature = "affinity", target_os = "linux")))]
fn apply_affinity_hint(_cpu: usize) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::severity::Severity;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_line_format_is_unpadded() {
        let mut record = Record::eager(Severity::Info, "hello");
        record.timestamp = chrono::Utc
            .with_ymd_and_hms(2024, 3, 5, 9, 1, 7)
            .single()
            .unwrap()
            + chrono::Duration::nanoseconds(42);

        let line = format_line(&record, 3);
        assert_eq!(line, "2024-3-5 9:1:7.42\t\tThread ID : 3\thello\n");
    }

    #[test]
    fn test_affinity_hint_wraps_lower_cores() {
        // single consumer pins everything to core 1
        assert_eq!(affinity_hint(0, 1), 1);
        // four consumers cycle over cores 1..=2
        assert_eq!(
            (0..4).map(|i| affinity_hint(i, 4)).collect::<Vec<_>>(),
            vec![1, 2, 1, 2]
        );
        // odd counts floor the divisor
        assert_eq!(affinity_hint(4, 5), 1);
    }

    #[test]
    fn test_worker_drains_then_exits() {
        let dir = TempDir::new().unwrap();
        let sinks = Arc::new(SinkSet::open(dir.path()));
        let shard = Arc::new(Shard::new());
        let counters = Arc::new(PipelineCounters::default());

        let consumer = Consumer {
            shard_id: 0,
            shard: Arc::clone(&shard),
            sinks: Arc::clone(&sinks),
            console: None,
            counters: Arc::clone(&counters),
            cpu_hint: 1,
        };
        let handle = std::thread::spawn(move || consumer.run());

        // wait for publication
        let queue = loop {
            if let Some(queue) = shard.published_queue() {
                break queue;
            }
            std::thread::yield_now();
        };

        for i in 0..50 {
            queue.push(Record::eager(Severity::Warn, format!("line {}", i)));
        }
        shard.terminate.store(true, Ordering::Release);
        handle.join().unwrap();

        // slot cleared on exit
        assert!(shard.published_queue().is_none());

        sinks.flush_all();
        let content =
            std::fs::read_to_string(sinks.directory().join("WARN.log")).unwrap();
        for i in 0..50 {
            assert!(content.contains(&format!("\tline {}\n", i)));
        }
    }

    #[test]
    fn test_render_error_writes_sentinel_and_counts() {
        let dir = TempDir::new().unwrap();
        let sinks = Arc::new(SinkSet::open(dir.path()));
        let shard = Arc::new(Shard::new());
        let counters = Arc::new(PipelineCounters::default());

        let consumer = Consumer {
            shard_id: 0,
            shard: Arc::clone(&shard),
            sinks: Arc::clone(&sinks),
            console: None,
            counters: Arc::clone(&counters),
            cpu_hint: 1,
        };
        let handle = std::thread::spawn(move || consumer.run());

        let queue = loop {
            if let Some(queue) = shard.published_queue() {
                break queue;
            }
            std::thread::yield_now();
        };
        queue.push(Record::deferred(
            Severity::Debug,
            "{} {}",
            vec![crate::core::record::ArgValue::from(1)],
        ));
        shard.terminate.store(true, Ordering::Release);
        handle.join().unwrap();

        sinks.flush_all();
        let content =
            std::fs::read_to_string(sinks.directory().join("DEBUG.log")).unwrap();
        assert!(content.contains("<RENDER ERROR: \"{} {}\">"));
        assert_eq!(counters.render_errors.load(Ordering::Relaxed), 1);
    }
}
