//! Identifiers the player has seen described.

use cupboard_foundation::Ix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Registry of identifiers that have appeared in composed text.
///
/// The parser collaborator consults it to decide whether a noun refers to
/// something the player has heard of.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnownEntities {
    known: im::HashSet<Ix>,
}

impl KnownEntities {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an identifier as known. Returns true if it was new.
    pub fn learn(&mut self, ix: Ix) -> bool {
        self.known.insert(ix).is_none()
    }

    /// Whether an identifier is known.
    #[must_use]
    pub fn knows(&self, ix: Ix) -> bool {
        self.known.contains(&ix)
    }

    /// Forgets an identifier.
    pub fn forget(&mut self, ix: Ix) -> bool {
        self.known.remove(&ix).is_some()
    }

    /// Number of known identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Whether nothing is known yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
