//! Per-consumer record queue
//!
//! One unbounded lock-free MPMC queue per consumer worker, built on
//! crossbeam's `SegQueue` (segment-chained nodes, safe concurrent
//! reclamation). Producers `push`, the owning consumer `try_pop`s;
//! neither side ever blocks.

use super::record::Record;
use crossbeam_queue::SegQueue;

#[derive(Default)]
pub struct RecordQueue {
    inner: SegQueue<Record>,
}

impl RecordQueue {
    pub fn new() -> Self {
        Self {
            inner: SegQueue::new(),
        }
    }

    /// Enqueue a record. Never blocks; the queue grows by segment.
    #[inline]
    pub fn push(&self, record: Record) {
        self.inner.push(record);
    }

    /// Dequeue a record if one is ready. Never blocks.
    #[inline]
    pub fn try_pop(&self) -> Option<Record> {
        self.inner.pop()
    }

    /// Observational only: a false result may be stale by the time the
    /// caller acts on it.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::severity::Severity;
    use std::sync::Arc;

    #[test]
    fn test_fifo_single_producer() {
        let queue = RecordQueue::new();
        for i in 0..100 {
            queue.push(Record::eager(Severity::Info, format!("msg-{}", i)));
        }
        for i in 0..100 {
            let record = queue.try_pop().expect("queue drained early");
            assert_eq!(record.message(), format!("msg-{}", i));
        }
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn test_empty_pop_is_none() {
        let queue = RecordQueue::new();
        assert!(queue.is_empty());
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn test_concurrent_producers_exactly_once() {
        let queue = Arc::new(RecordQueue::new());
        let producers = 4;
        let per_producer = 1000;

        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let queue = Arc::clone(&queue);
                std::thread::spawn(move || {
                    for i in 0..per_producer {
                        queue.push(Record::eager(
                            Severity::Debug,
                            format!("p{}-{}", p, i),
                        ));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut seen = std::collections::HashSet::new();
        while let Some(record) = queue.try_pop() {
            assert!(seen.insert(record.message().to_string()), "duplicate pop");
        }
        assert_eq!(seen.len(), producers * per_producer);
    }

    #[test]
    fn test_per_producer_order_preserved() {
        let queue = Arc::new(RecordQueue::new());
        let handles: Vec<_> = (0..2)
            .map(|p| {
                let queue = Arc::clone(&queue);
                std::thread::spawn(move || {
                    for i in 0..500 {
                        queue.push(Record::eager(Severity::Trace, format!("p{} {}", p, i)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut last = [None::<usize>; 2];
        while let Some(record) = queue.try_pop() {
            let (producer, seq) = record
                .message()
                .split_once(' ')
                .map(|(p, s)| {
                    (
                        p.trim_start_matches('p').parse::<usize>().unwrap(),
                        s.parse::<usize>().unwrap(),
                    )
                })
                .unwrap();
            if let Some(prev) = last[producer] {
                assert!(seq > prev, "producer {} reordered: {} after {}", producer, seq, prev);
            }
            last[producer] = Some(seq);
        }
    }
}
