//! Error types for Cupboard.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Speculative removals and state toggles report failure with `bool`; these
//! errors are for world-building mistakes and index drift.

use std::fmt;

use thiserror::Error;

use crate::id::EntityId;

/// The main error type for Cupboard operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates an error for using a non-holder as a container.
    #[must_use]
    pub fn not_a_holder(id: EntityId) -> Self {
        Self::new(ErrorKind::NotAHolder(id))
    }

    /// Creates an index drift error.
    #[must_use]
    pub fn index_drift(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IndexDrift(message.into()))
    }

    /// Returns true if this error is a world-building configuration mistake
    /// rather than a bad handle or internal defect.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NotAHolder(_)
                | ErrorKind::ContainmentCycle { .. }
                | ErrorKind::NotAContainer(_)
                | ErrorKind::NotADoor(_)
                | ErrorKind::NotALock(_)
                | ErrorKind::CannotTakeLock(_)
                | ErrorKind::LockAlreadyBound { .. }
                | ErrorKind::HostAlreadyLocked { .. }
                | ErrorKind::NotALiquid(_)
                | ErrorKind::NotAVessel(_)
                | ErrorKind::AlreadyAttached { .. }
                | ErrorKind::NotComposite(_)
                | ErrorKind::VesselFull { .. }
                | ErrorKind::TravelsWithHost { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity was never allocated or its slot is free.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity handle is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// The target cannot hold other entities.
    #[error("{0:?} cannot hold other entities")]
    NotAHolder(EntityId),

    /// The entity already has a direct parent.
    #[error("{entity:?} is already placed in {location:?}")]
    AlreadyPlaced {
        /// The entity being placed.
        entity: EntityId,
        /// Its current direct parent.
        location: EntityId,
    },

    /// Placing the entity there would make it contain itself.
    #[error("{entity:?} cannot be placed inside {container:?}: it would contain itself")]
    ContainmentCycle {
        /// The entity being placed.
        entity: EntityId,
        /// The requested container.
        container: EntityId,
    },

    /// The entity is not a container that can take a lid.
    #[error("{0:?} is not a container")]
    NotAContainer(EntityId),

    /// The entity is not one side of a door.
    #[error("{0:?} is not a door")]
    NotADoor(EntityId),

    /// The entity is not a lock.
    #[error("{0:?} is not a lock")]
    NotALock(EntityId),

    /// The host has no place for a lock (lidless container, plain thing).
    #[error("{0:?} cannot take a lock")]
    CannotTakeLock(EntityId),

    /// The lock already guards another host.
    #[error("lock {lock:?} is already bound to {host:?}")]
    LockAlreadyBound {
        /// The lock being bound.
        lock: EntityId,
        /// The host it already guards.
        host: EntityId,
    },

    /// The host already carries a lock.
    #[error("{host:?} already has lock {lock:?}")]
    HostAlreadyLocked {
        /// The host being locked.
        host: EntityId,
        /// The lock it already has.
        lock: EntityId,
    },

    /// The entity is not a liquid.
    #[error("{0:?} is not a liquid")]
    NotALiquid(EntityId),

    /// The entity cannot hold liquids.
    #[error("{0:?} cannot hold liquids")]
    NotAVessel(EntityId),

    /// The sub-object is already attached to a composite.
    #[error("{child:?} is already attached to {parent:?}")]
    AlreadyAttached {
        /// The sub-object being attached.
        child: EntityId,
        /// The composite it already belongs to.
        parent: EntityId,
    },

    /// The container already holds a liquid. Merging goes through `fill`.
    #[error("{container:?} already holds liquid {liquid:?}")]
    VesselFull {
        /// The container.
        container: EntityId,
        /// The liquid already in it.
        liquid: EntityId,
    },

    /// A bound lock or attached sub-object only moves with its host.
    #[error("{entity:?} moves only with its host {host:?}")]
    TravelsWithHost {
        /// The lock or sub-object.
        entity: EntityId,
        /// The container, door or composite it belongs to.
        host: EntityId,
    },

    /// The entity has no attached sub-objects.
    #[error("{0:?} is not composite")]
    NotComposite(EntityId),

    /// The entity is still indexed somewhere and cannot be discarded.
    #[error("{0:?} is still placed in the world")]
    StillPlaced(EntityId),

    /// A derived index disagrees with the ground truth.
    #[error("index drift: {0}")]
    IndexDrift(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation that failed ("bind_lock", "fill").
    pub operation: Option<String>,
    /// Entities involved, outermost first.
    pub entities: Vec<EntityId>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Adds an involved entity.
    #[must_use]
    pub fn with_entity(mut self, id: EntityId) -> Self {
        self.entities.push(id);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = &self.operation {
            write!(f, "in {op}")?;
        }
        for (i, id) in self.entities.iter().enumerate() {
            let sep = if i == 0 { " for " } else { ", " };
            write!(f, "{sep}{id}")?;
        }
        Ok(())
    }
}
