//! Entity records and their generational store.
//!
//! The `EntityStore` owns every record. Records point at each other only by
//! [`EntityId`] (location, bound lock, twin, attached children), so back
//! references never form ownership cycles.

use cupboard_foundation::{EntityId, Error, Ix, Noun, Result, WordId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::contents::Holdings;
use crate::kind::Kind;

/// Cached description text. Recomputed eagerly on every mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Descriptions {
    /// Base short description set by the world builder.
    pub base_desc: String,
    /// Base examine description set by the world builder.
    pub base_xdesc: String,
    /// Composed short description.
    pub desc: String,
    /// Composed examine description.
    pub xdesc: String,
    /// Composed sentence listing visible direct contents.
    pub contents_desc: String,
    /// Whether the contents sentence is part of `desc`.
    pub desc_reveal: bool,
    /// Whether the contents sentence is part of `xdesc`.
    pub xdesc_reveal: bool,
}

/// Sub-objects permanently attached to a composite entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Composite {
    /// Attached children in attachment order.
    pub children: Vec<EntityId>,
    /// Merged description used instead of concatenating the children's.
    pub children_desc: Option<String>,
}

/// One simulated object.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    /// Stable identifier, shared by indistinguishable copies.
    pub ix: Ix,
    /// Naming metadata.
    pub noun: Noun,
    /// Adjectives used for disambiguation.
    pub adjectives: Vec<WordId>,
    /// Alternative head nouns.
    pub synonyms: Vec<WordId>,
    /// What the entity is.
    pub kind: Kind,
    /// Direct parent. `None` means the entity is not in the world.
    pub location: Option<EntityId>,
    /// Host this entity is described as part of: a bound lock's container or
    /// door, or an attached child's composite.
    pub parent_obj: Option<EntityId>,
    /// Lock bound to this container or door.
    pub lock_obj: Option<EntityId>,
    /// Other side of a two-sided door, or that side's lock.
    pub twin: Option<EntityId>,
    /// Attached sub-objects, when composite.
    pub composite: Option<Composite>,
    /// Whether the entity may be carried in an inventory.
    pub inv_item: bool,
    /// Space the entity occupies; for holders, the space they offer.
    pub size: u32,
    /// Indexes for holder kinds.
    pub holdings: Option<Holdings>,
    /// Cached description text.
    pub text: Descriptions,
}

impl Entity {
    /// Whether this entity carries attached sub-objects.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.composite.is_some()
    }

    /// Attached sub-objects, in attachment order.
    #[must_use]
    pub fn children(&self) -> &[EntityId] {
        self.composite
            .as_ref()
            .map_or(&[], |composite| composite.children.as_slice())
    }
}

/// Recipe for spawning an entity.
#[derive(Clone, Debug)]
pub struct Blueprint {
    pub(crate) ix: String,
    pub(crate) noun: Noun,
    pub(crate) kind: Kind,
    pub(crate) adjectives: Vec<String>,
    pub(crate) synonyms: Vec<String>,
    pub(crate) size: Option<u32>,
    pub(crate) desc: Option<String>,
    pub(crate) xdesc: Option<String>,
    pub(crate) inv_item: Option<bool>,
}

impl Blueprint {
    /// Starts a blueprint. The noun defaults to the identifier.
    #[must_use]
    pub fn new(ix: impl Into<String>, kind: Kind) -> Self {
        let ix = ix.into();
        Self {
            noun: Noun::new(ix.clone()),
            ix,
            kind,
            adjectives: Vec::new(),
            synonyms: Vec::new(),
            size: None,
            desc: None,
            xdesc: None,
            inv_item: None,
        }
    }

    /// Sets the head noun, keeping other naming defaults.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.noun = Noun::new(name);
        self
    }

    /// Sets the full naming metadata.
    #[must_use]
    pub fn noun(mut self, noun: Noun) -> Self {
        self.noun = noun;
        self
    }

    /// Adds an adjective.
    #[must_use]
    pub fn adjective(mut self, word: impl Into<String>) -> Self {
        self.adjectives.push(word.into());
        self
    }

    /// Adds a synonym.
    #[must_use]
    pub fn synonym(mut self, word: impl Into<String>) -> Self {
        self.synonyms.push(word.into());
        self
    }

    /// Overrides the default size.
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the base short description.
    #[must_use]
    pub fn desc(mut self, text: impl Into<String>) -> Self {
        self.desc = Some(text.into());
        self
    }

    /// Sets the base examine description.
    #[must_use]
    pub fn xdesc(mut self, text: impl Into<String>) -> Self {
        self.xdesc = Some(text.into());
        self
    }

    /// Overrides whether the entity can be carried.
    #[must_use]
    pub fn inv_item(mut self, inv_item: bool) -> Self {
        self.inv_item = Some(inv_item);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Slot {
    /// Odd generations are alive, even are free.
    generation: u32,
    entity: Option<Entity>,
}

/// Generational store of entity records.
///
/// Freed slots are reused with a bumped generation, so handles to destroyed
/// entities are detected as stale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityStore {
    slots: im::Vector<Slot>,
    free_list: Vec<u32>,
    live_count: usize,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slots are allocated.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.live_count += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation += 1;
            slot.entity = Some(entity);
            EntityId::new(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len()).expect("entity store exhausted");
            self.slots.push_back(Slot {
                generation: 1,
                entity: Some(entity),
            });
            EntityId::new(index, 1)
        }
    }

    /// Takes a record out of the store, freeing its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or was never issued.
    pub fn remove(&mut self, id: EntityId) -> Result<Entity> {
        self.validate(id)?;
        let slot = &mut self.slots[id.slot()];
        slot.generation += 1;
        let entity = slot
            .entity
            .take()
            .ok_or_else(|| Error::entity_not_found(id))?;
        self.free_list.push(id.index);
        self.live_count -= 1;
        Ok(entity)
    }

    /// Checks that a handle refers to a live record.
    ///
    /// # Errors
    ///
    /// Returns `StaleEntity` on generation mismatch and `EntityNotFound` for
    /// slots that were never allocated or are free.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(slot) = self.slots.get(id.slot()) else {
            return Err(Error::entity_not_found(id));
        };
        if slot.generation != id.generation {
            return Err(Error::stale_entity(id));
        }
        if slot.generation % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }
        Ok(())
    }

    /// Whether a handle refers to a live record.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.validate(id).is_ok()
    }

    /// Returns the record for a live handle.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .get(id.slot())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    /// Returns the mutable record for a live handle.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .get_mut(id.slot())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Whether the store holds no live records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over live handles and records.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let entity = slot.entity.as_ref()?;
            let index = u32::try_from(index).ok()?;
            Some((EntityId::new(index, slot.generation), entity))
        })
    }
}
