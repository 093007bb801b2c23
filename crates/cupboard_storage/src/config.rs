//! Configuration for a world context.

use crate::trace::TracerConfig;

/// Configuration for a [`World`](crate::World).
///
/// Controls tracing, debug verification, knowledge tracking, and the
/// defaults applied when spawning entities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Tracer configuration.
    pub tracer: TracerConfig,
    /// Re-derive every index after each public mutation (debug builds only).
    pub verify_indexes: bool,
    /// Whether composing descriptions marks listed identifiers as known.
    pub track_knowledge: bool,
    /// Default size of non-holder entities.
    pub thing_size: u32,
    /// Default size of holders.
    pub holder_size: u32,
    /// Text placed between a contents list and the "You are in X." clause.
    pub clause_separator: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tracer: TracerConfig::default(),
            verify_indexes: cfg!(debug_assertions),
            track_knowledge: true,
            thing_size: 5,
            holder_size: 50,
            clause_separator: " ".to_string(),
        }
    }
}

impl WorldConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with tracing on, for development.
    #[must_use]
    pub fn development() -> Self {
        Self {
            tracer: TracerConfig::new().enabled(),
            verify_indexes: true,
            ..Self::default()
        }
    }

    /// Builder method to set the tracer configuration.
    #[must_use]
    pub fn with_tracer(mut self, tracer: TracerConfig) -> Self {
        self.tracer = tracer;
        self
    }

    /// Builder method to toggle index verification.
    #[must_use]
    pub fn with_verify_indexes(mut self, verify: bool) -> Self {
        self.verify_indexes = verify;
        self
    }

    /// Builder method to toggle knowledge tracking.
    #[must_use]
    pub fn with_track_knowledge(mut self, track: bool) -> Self {
        self.track_knowledge = track;
        self
    }

    /// Builder method to set default sizes.
    #[must_use]
    pub fn with_sizes(mut self, thing_size: u32, holder_size: u32) -> Self {
        self.thing_size = thing_size;
        self.holder_size = holder_size;
        self
    }

    /// Builder method to set the clause separator.
    #[must_use]
    pub fn with_clause_separator(mut self, separator: impl Into<String>) -> Self {
        self.clause_separator = separator.into();
        self
    }
}
