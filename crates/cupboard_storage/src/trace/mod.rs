//! Tracing of containment activity.
//!
//! Records what the engine did to the object graph, turn by turn, with zero
//! overhead when disabled. World-building mistakes are always recorded here
//! as `Diagnostic` events when tracing is on.

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, TraceFormatter};
pub use record::{Subject, TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use cupboard_foundation::Interner;

/// Where records are echoed as they are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (records are still buffered).
    #[default]
    None,
    /// Write each record to stderr as it happens.
    Stderr,
}

/// How the containment tracer records and reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracerConfig {
    /// Whether events are recorded at all.
    pub enabled: bool,
    /// Maximum records to keep in the buffer.
    pub buffer_size: usize,
    /// Where to output records.
    pub output: TraceOutput,
    /// Event types to keep (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10_000,
            output: TraceOutput::None,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a disabled configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns recording on.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Caps how many records are retained.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to echo records to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to keep only some event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

/// Records containment events.
#[derive(Clone, Debug)]
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_turn: u64,
    start_time: Instant,
    formatter: HumanFormatter,
}

impl Tracer {
    /// Creates a tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer = TraceBuffer::new(config.buffer_size);
        Self {
            config,
            buffer,
            current_turn: 0,
            start_time: Instant::now(),
            formatter: HumanFormatter::new(),
        }
    }

    /// Creates a disabled tracer.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Whether events are being recorded.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Sets the current turn.
    pub fn set_turn(&mut self, turn: u64) {
        self.current_turn = turn;
    }

    /// Returns the current turn.
    #[must_use]
    pub fn current_turn(&self) -> u64 {
        self.current_turn
    }

    /// Records an event. Returns immediately when disabled.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }
        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|t| t == event.event_type())
        {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.current_turn, timestamp_ns, event);

        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.last() {
                let _ = writeln!(
                    io::stderr(),
                    "T{:04} [{:06}] {}",
                    record.turn,
                    record.id,
                    record.event_type()
                );
            }
        }
    }

    /// Formats a record in human-readable form.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord, interner: &Interner) -> String {
        self.formatter.format(record, interner)
    }

    /// Formats several records, one per line.
    #[must_use]
    pub fn format_records(&self, records: &[&TraceRecord], interner: &Interner) -> String {
        self.formatter.format_many(records, interner)
    }

    /// Held records, oldest first.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Drops every held record.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Counts of held, recorded and evicted records.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}
