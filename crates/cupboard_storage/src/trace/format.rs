//! Trace output formatting.

use cupboard_foundation::Interner;

use super::record::{Subject, TraceEvent, TraceRecord};

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord, interner: &Interner) -> String;

    /// Formats multiple records, one per line.
    fn format_many(&self, records: &[&TraceRecord], interner: &Interner) -> String {
        records
            .iter()
            .map(|r| self.format(r, interner))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record ids.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record ids.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    fn subject(s: Subject, interner: &Interner) -> String {
        format!("{}{}", interner.ix_name(s.ix).unwrap_or("?"), s.id)
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }

    fn describe(event: &TraceEvent, interner: &Interner) -> String {
        let s = |subject: &Subject| Self::subject(*subject, interner);
        match event {
            TraceEvent::Placed { entity, container } => {
                format!("placed {} in {}", s(entity), s(container))
            }
            TraceEvent::Removed { entity, container } => {
                format!("removed {} from {}", s(entity), s(container))
            }
            TraceEvent::RemoveMissed { entity, container } => {
                format!("{} is not in {}", s(entity), s(container))
            }
            TraceEvent::Revealed { holder, exposed } => {
                format!("revealed {} ({exposed} exposed)", s(holder))
            }
            TraceEvent::Concealed { holder, hidden } => {
                format!("concealed {} ({hidden} hidden)", s(holder))
            }
            TraceEvent::LockBound { lock, host } => {
                format!("bound {} to {}", s(lock), s(host))
            }
            TraceEvent::LockChanged { lock, locked } => {
                let state = if *locked { "locked" } else { "unlocked" };
                format!("{} {state}", s(lock))
            }
            TraceEvent::DoorChanged { door, open } => {
                let state = if *open { "opened" } else { "closed" };
                format!("{} {state}", s(door))
            }
            TraceEvent::LightChanged { light, lit } => {
                let state = if *lit { "lit" } else { "put out" };
                format!("{} {state}", s(light))
            }
            TraceEvent::LightBurntOut { light } => format!("{} burnt out", s(light)),
            TraceEvent::Attached { parent, child } => {
                format!("attached {} to {}", s(child), s(parent))
            }
            TraceEvent::LiquidMoved { liquid, vessel } => {
                format!("poured {} into {}", s(liquid), s(vessel))
            }
            TraceEvent::LiquidCopied {
                source,
                copy,
                vessel,
            } => format!("drew {} from {} into {}", s(copy), s(source), s(vessel)),
            TraceEvent::LiquidMixed { result, vessel } => {
                format!("mixed {} in {}", s(result), s(vessel))
            }
            TraceEvent::LiquidSpilled { liquid, location } => {
                format!("spilled {} in {}", s(liquid), s(location))
            }
            TraceEvent::Destroyed { entity } => format!("destroyed {}", s(entity)),
            TraceEvent::Diagnostic { operation, message } => {
                format!("diagnostic in {operation}: {message}")
            }
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord, interner: &Interner) -> String {
        let mut line = format!("T{:04}", record.turn);
        if self.show_ids {
            line.push_str(&format!(" [{:06}]", record.id));
        }
        if self.show_timestamps {
            line.push_str(&format!(" +{}", Self::format_timestamp(record.timestamp_ns)));
        }
        line.push(' ');
        line.push_str(&Self::describe(&record.event, interner));
        line
    }
}
