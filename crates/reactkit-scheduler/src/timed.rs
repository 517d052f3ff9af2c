//! Time keeping and the due-time queue for timed reactions.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::handle::SlotKey;

/// Extends the wrapping `u32` millisecond clock to a monotonic `u64`.
///
/// Each observation adds the wrapping difference from the previous raw
/// reading, so due times keep their order across a `u32` rollover as long as
/// the clock is observed at least once every 49 days.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    last_raw: u32,
    now: u64,
}

impl Timeline {
    /// Start the extended clock at the first raw reading.
    #[must_use]
    pub fn new(raw: u32) -> Self {
        Self {
            last_raw: raw,
            now: u64::from(raw),
        }
    }

    /// Fold a new raw reading in and return the extended time.
    pub fn observe(&mut self, raw: u32) -> u64 {
        let elapsed = raw.wrapping_sub(self.last_raw);
        self.last_raw = raw;
        self.now = self.now.saturating_add(u64::from(elapsed));
        self.now
    }

    /// Extended time at the last observation.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }
}

/// One queued fire.
///
/// Ordered by due time, then by `seq` so equal due times fire in the order
/// they were queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueueEntry {
    /// Extended clock time the reaction becomes due
    pub due: u64,
    /// Queue insertion sequence
    pub seq: u64,
    /// Slot of the reaction
    pub key: SlotKey,
}

/// Min-heap of timed reactions by due time.
///
/// Sized for one entry per timed slot; a live reaction has exactly one
/// entry, so pushes never reallocate.
#[derive(Debug)]
pub struct TimedQueue {
    heap: BinaryHeap<Reverse<QueueEntry>>,
    next_seq: u64,
}

impl TimedQueue {
    /// Reserve room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Queue `key` to fire at `due`.
    pub fn push(&mut self, due: u64, key: SlotKey) -> QueueEntry {
        let entry = QueueEntry {
            due,
            seq: self.next_seq,
            key,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Reverse(entry));
        entry
    }

    /// The earliest entry.
    #[must_use]
    pub fn peek(&self) -> Option<QueueEntry> {
        self.heap.peek().map(|Reverse(entry)| *entry)
    }

    /// Remove and return the earliest entry.
    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    /// Drop every entry for `key`. Returns how many were dropped.
    pub fn remove(&mut self, key: SlotKey) -> usize {
        let before = self.heap.len();
        self.heap.retain(|Reverse(entry)| entry.key != key);
        before - self.heap.len()
    }

    /// Sequence number the next push will get. Entries at or past this
    /// value were queued after the caller looked.
    #[must_use]
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Nothing queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(index: u16) -> SlotKey {
        SlotKey {
            index,
            generation: 0,
        }
    }

    #[test]
    fn test_timeline_crosses_wrap() {
        let mut timeline = Timeline::new(u32::MAX - 5);
        let before = timeline.now();
        let after = timeline.observe(10);
        assert_eq!(after - before, 16);
    }

    #[test]
    fn test_timeline_same_reading_is_stable() {
        let mut timeline = Timeline::new(40);
        assert_eq!(timeline.observe(40), 40);
        assert_eq!(timeline.observe(45), 45);
    }

    #[test]
    fn test_queue_orders_by_due() {
        let mut queue = TimedQueue::with_capacity(4);
        queue.push(300, key(0));
        queue.push(100, key(1));
        queue.push(200, key(2));

        let order: Vec<u16> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.key.index)
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_queue_ties_fire_fifo() {
        let mut queue = TimedQueue::with_capacity(4);
        queue.push(50, key(3));
        queue.push(50, key(1));
        queue.push(50, key(2));

        let order: Vec<u16> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.key.index)
            .collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_queue_remove() {
        let mut queue = TimedQueue::with_capacity(4);
        queue.push(10, key(0));
        queue.push(20, key(1));

        assert_eq!(queue.remove(key(0)), 1);
        assert_eq!(queue.remove(key(0)), 0);
        assert_eq!(queue.peek().map(|e| e.key.index), Some(1));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_next_seq_marks_later_pushes() {
        let mut queue = TimedQueue::with_capacity(2);
        queue.push(0, key(0));
        let horizon = queue.next_seq();
        let late = queue.push(0, key(1));
        assert!(late.seq >= horizon);
    }
}
