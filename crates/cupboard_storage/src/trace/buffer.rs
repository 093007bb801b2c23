//! Ring buffer for trace records.

use std::collections::VecDeque;

use super::record::{TraceEvent, TraceRecord};

/// Holds the most recent trace records, discarding the oldest when full.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    records: VecDeque<TraceRecord>,
    max_size: usize,
    next_id: u64,
    evicted: u64,
}

impl TraceBuffer {
    /// Creates a buffer holding at most `max_size` records.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
            evicted: 0,
        }
    }

    /// Appends an event and returns the assigned record id.
    pub fn push(&mut self, turn: u64, timestamp_ns: u64, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records
            .push_back(TraceRecord::new(id, turn, timestamp_ns, event));
        while self.records.len() > self.max_size {
            self.records.pop_front();
            self.evicted += 1;
        }
        id
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears all records. Ids keep increasing.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Oldest-first iterator over held records.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// The newest record.
    #[must_use]
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.back()
    }

    /// Records from one turn.
    #[must_use]
    pub fn records_for_turn(&self, turn: u64) -> Vec<&TraceRecord> {
        self.records.iter().filter(|r| r.turn == turn).collect()
    }

    /// The most recent `count` records, oldest first.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&TraceRecord> {
        let skip = self.records.len().saturating_sub(count);
        self.records.iter().skip(skip).collect()
    }

    /// Records of one event type.
    #[must_use]
    pub fn of_type(&self, event_type: &str) -> Vec<&TraceRecord> {
        self.records
            .iter()
            .filter(|r| r.event_type() == event_type)
            .collect()
    }

    /// Buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        TraceBufferStats {
            held: self.records.len(),
            capacity: self.max_size,
            recorded: self.next_id,
            evicted: self.evicted,
        }
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new(10_000)
    }
}

/// Counters describing a [`TraceBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceBufferStats {
    /// Records currently held.
    pub held: usize,
    /// Maximum records held.
    pub capacity: usize,
    /// Records ever pushed.
    pub recorded: u64,
    /// Records dropped to make room.
    pub evicted: u64,
}
