//! Entity instance handles with generational indices.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to one simulated object instance.
///
/// Several instances may share a stable identifier ([`crate::Ix`]) when they
/// are indistinguishable copies; the handle is what tells them apart.
/// The generation detects handles that outlived a destroyed instance.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId {
    /// Slot in the entity store.
    pub index: u32,
    /// Generation of the slot when this handle was issued.
    pub generation: u32,
}

impl EntityId {
    /// Creates a handle from its parts.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot as a `usize` for store indexing.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
