//! Ordered multimaps from stable identifier to entity instances.
//!
//! Both the direct membership table and the transitive visibility index use
//! [`Contents`]. Keys keep their first-insertion order so generated lists are
//! stable, and a key is dropped the moment its last instance leaves.

use cupboard_foundation::{EntityId, Ix};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mapping from identifier to the non-empty sequence of instances sharing it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contents {
    groups: im::HashMap<Ix, im::Vector<EntityId>>,
    order: im::Vector<Ix>,
}

impl Contents {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an instance under its identifier.
    ///
    /// Returns false if the instance was already present.
    pub fn insert(&mut self, ix: Ix, id: EntityId) -> bool {
        match self.groups.get_mut(&ix) {
            Some(group) => {
                if group.contains(&id) {
                    return false;
                }
                group.push_back(id);
            }
            None => {
                self.groups.insert(ix, im::vector![id]);
                self.order.push_back(ix);
            }
        }
        true
    }

    /// Removes an instance. Drops the key when its group becomes empty.
    ///
    /// Returns false if the instance was not present.
    pub fn remove(&mut self, ix: Ix, id: EntityId) -> bool {
        let Some(group) = self.groups.get_mut(&ix) else {
            return false;
        };
        let Some(pos) = group.index_of(&id) else {
            return false;
        };
        group.remove(pos);
        if group.is_empty() {
            self.groups.remove(&ix);
            if let Some(pos) = self.order.index_of(&ix) {
                self.order.remove(pos);
            }
        }
        true
    }

    /// Whether the instance is present under the identifier.
    #[must_use]
    pub fn contains(&self, ix: Ix, id: EntityId) -> bool {
        self.groups.get(&ix).is_some_and(|group| group.contains(&id))
    }

    /// Whether any instance carries the identifier.
    #[must_use]
    pub fn contains_ix(&self, ix: Ix) -> bool {
        self.groups.contains_key(&ix)
    }

    /// Instances sharing an identifier.
    #[must_use]
    pub fn get(&self, ix: Ix) -> Option<&im::Vector<EntityId>> {
        self.groups.get(&ix)
    }

    /// Groups in first-insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (Ix, &im::Vector<EntityId>)> + '_ {
        self.order
            .iter()
            .filter_map(move |ix| self.groups.get(ix).map(|group| (*ix, group)))
    }

    /// Every instance, grouped by identifier in first-insertion order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.groups().flat_map(|(_, group)| group.iter().copied())
    }

    /// Identifiers in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = Ix> + '_ {
        self.order.iter().copied()
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.order.len()
    }

    /// Number of instances across all identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(im::Vector::len).sum()
    }

    /// Whether nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether some key maps to an empty group or the order list disagrees
    /// with the key set.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.groups.values().any(im::Vector::is_empty)
            || self.order.len() != self.groups.len()
            || self.order.iter().any(|ix| !self.groups.contains_key(ix))
    }
}

/// The two indexes every holder carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Holdings {
    /// Direct contents.
    pub contains: Contents,
    /// Everything beneath the holder that is visible from it, direct
    /// contents included.
    pub sub_contains: Contents,
}
