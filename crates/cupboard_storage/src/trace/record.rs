//! Trace event and record types.

use cupboard_foundation::{EntityId, Ix};

/// An entity as it appears in a trace: handle plus stable identifier, so
/// records stay readable after the entity is destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subject {
    /// Instance handle.
    pub id: EntityId,
    /// Stable identifier.
    pub ix: Ix,
}

/// Events recorded by the containment engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// An entity was added to a holder.
    Placed {
        /// The entity.
        entity: Subject,
        /// Its new direct parent.
        container: Subject,
    },
    /// An entity was removed from a holder.
    Removed {
        /// The entity.
        entity: Subject,
        /// Its former direct parent.
        container: Subject,
    },
    /// A speculative removal found nothing to remove.
    RemoveMissed {
        /// The entity.
        entity: Subject,
        /// The holder asked to give it up.
        container: Subject,
    },
    /// A holder's contents became visible to its ancestors.
    Revealed {
        /// The opened container or looked-under space.
        holder: Subject,
        /// How many entities entered ancestor indexes.
        exposed: usize,
    },
    /// A holder's contents were hidden from its ancestors.
    Concealed {
        /// The closed container or hidden space.
        holder: Subject,
        /// How many entities left ancestor indexes.
        hidden: usize,
    },
    /// A lock was bound to a container or door.
    LockBound {
        /// The lock.
        lock: Subject,
        /// Its host.
        host: Subject,
    },
    /// A lock changed state.
    LockChanged {
        /// The lock.
        lock: Subject,
        /// New state.
        locked: bool,
    },
    /// A door side changed state.
    DoorChanged {
        /// The door side.
        door: Subject,
        /// New state.
        open: bool,
    },
    /// A light was lit or put out.
    LightChanged {
        /// The light.
        light: Subject,
        /// New state.
        lit: bool,
    },
    /// A consumable light used its last turn.
    LightBurntOut {
        /// The light.
        light: Subject,
    },
    /// A sub-object was attached to a composite.
    Attached {
        /// The composite.
        parent: Subject,
        /// The sub-object.
        child: Subject,
    },
    /// A liquid moved into a vessel.
    LiquidMoved {
        /// The liquid.
        liquid: Subject,
        /// Destination vessel.
        vessel: Subject,
    },
    /// An infinite well supplied a copy.
    LiquidCopied {
        /// The well.
        source: Subject,
        /// The new instance.
        copy: Subject,
        /// Destination vessel.
        vessel: Subject,
    },
    /// Two liquids were mixed.
    LiquidMixed {
        /// The resulting liquid.
        result: Subject,
        /// Vessel holding it.
        vessel: Subject,
    },
    /// A liquid was dumped out of its vessel.
    LiquidSpilled {
        /// The liquid.
        liquid: Subject,
        /// Where it landed.
        location: Subject,
    },
    /// An unplaced entity was discarded.
    Destroyed {
        /// The entity.
        entity: Subject,
    },
    /// A world-building mistake.
    Diagnostic {
        /// Operation that failed.
        operation: &'static str,
        /// Rendered error.
        message: String,
    },
}

impl TraceEvent {
    /// Returns the event type as a string, used for filtering.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Placed { .. } => "placed",
            Self::Removed { .. } => "removed",
            Self::RemoveMissed { .. } => "remove_missed",
            Self::Revealed { .. } => "revealed",
            Self::Concealed { .. } => "concealed",
            Self::LockBound { .. } => "lock_bound",
            Self::LockChanged { .. } => "lock_changed",
            Self::DoorChanged { .. } => "door_changed",
            Self::LightChanged { .. } => "light_changed",
            Self::LightBurntOut { .. } => "light_burnt_out",
            Self::Attached { .. } => "attached",
            Self::LiquidMoved { .. } => "liquid_moved",
            Self::LiquidCopied { .. } => "liquid_copied",
            Self::LiquidMixed { .. } => "liquid_mixed",
            Self::LiquidSpilled { .. } => "liquid_spilled",
            Self::Destroyed { .. } => "destroyed",
            Self::Diagnostic { .. } => "diagnostic",
        }
    }
}

/// A recorded event with its position in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Monotonic record id.
    pub id: u64,
    /// Turn the event happened in.
    pub turn: u64,
    /// Nanoseconds since the tracer started.
    pub timestamp_ns: u64,
    /// The event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(id: u64, turn: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            turn,
            timestamp_ns,
            event,
        }
    }

    /// Shorthand for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}
