//! Liquid transfer.
//!
//! Liquids move through the containment maintainer like anything else; what
//! is special is that a vessel holds at most one, an infinite well hands out
//! copies, and two different liquids only meet through a [`MixPolicy`].

use cupboard_foundation::{EntityId, ErrorKind, Result};

use crate::kind::Kind;
use crate::trace::TraceEvent;
use crate::world::World;

/// Decides what happens when a liquid is poured onto a different one.
pub trait MixPolicy {
    /// Mixes `mix_in` into `base`, which sits in a vessel.
    ///
    /// Returns the liquid now in the vessel, or `None` to refuse. An
    /// implementation that accepts is responsible for leaving exactly one
    /// liquid in the vessel.
    fn mix(&self, world: &mut World, base: EntityId, mix_in: EntityId) -> Option<EntityId>;
}

/// Refuses every mixture.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectMixing;

impl MixPolicy for RejectMixing {
    fn mix(&self, _world: &mut World, _base: EntityId, _mix_in: EntityId) -> Option<EntityId> {
        None
    }
}

/// Result of a fill attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOutcome {
    /// The vessel already holds this kind of liquid, or has no room.
    AlreadyFull,
    /// The source may not be drawn from, or the mix was refused.
    Rejected,
    /// The liquids were mixed into this one.
    Mixed(EntityId),
    /// An infinite well supplied this new instance.
    Copied(EntityId),
    /// The source itself moved into the vessel.
    Moved,
}

impl FillOutcome {
    /// Whether the vessel's contents changed.
    #[must_use]
    pub const fn succeeded(self) -> bool {
        matches!(self, Self::Mixed(_) | Self::Copied(_) | Self::Moved)
    }
}

impl World {
    /// The liquid a vessel holds, if any.
    #[must_use]
    pub fn contains_liquid(&self, vessel: EntityId) -> Option<EntityId> {
        let holdings = self.holdings(vessel).ok()?;
        holdings.contains.ids().find(|id| {
            self.entities
                .get(*id)
                .is_some_and(|entity| matches!(entity.kind, Kind::Liquid(_)))
        })
    }

    /// Space in a vessel not taken up by its liquid.
    #[must_use]
    pub fn liquid_room_left(&self, vessel: EntityId) -> u32 {
        let Some(size) = self.entities.get(vessel).map(|entity| entity.size) else {
            return 0;
        };
        let used = self
            .contains_liquid(vessel)
            .and_then(|liquid| self.entities.get(liquid))
            .map_or(0, |liquid| liquid.size);
        size.saturating_sub(used)
    }

    /// The vessel a liquid sits in, so verbs aimed at the liquid can act on
    /// its container.
    #[must_use]
    pub fn vessel_of(&self, liquid: EntityId) -> Option<EntityId> {
        let entity = self.entities.get(liquid)?;
        if entity.kind.as_liquid().is_none() {
            return None;
        }
        let location = entity.location?;
        self.entities
            .get(location)
            .is_some_and(|holder| holder.kind.is_vessel())
            .then_some(location)
    }

    /// Fills a vessel from a liquid, refusing to mix.
    ///
    /// # Errors
    ///
    /// See [`World::fill_with`].
    pub fn fill(&mut self, source: EntityId, vessel: EntityId) -> Result<FillOutcome> {
        self.fill_with(source, vessel, &RejectMixing)
    }

    /// Fills a vessel from a liquid.
    ///
    /// A vessel holding the same liquid, or the same type, is already full.
    /// A different type goes to `policy`. An empty vessel gets a copy from
    /// an infinite well, and otherwise the source itself.
    ///
    /// # Errors
    ///
    /// Returns `NotALiquid` or `NotAVessel` for the wrong kinds of entity.
    pub fn fill_with(
        &mut self,
        source: EntityId,
        vessel: EntityId,
        policy: &dyn MixPolicy,
    ) -> Result<FillOutcome> {
        let vessel_record = self.entity(vessel)?;
        if !vessel_record.kind.is_vessel() {
            return Err(self.reject("fill", ErrorKind::NotAVessel(vessel), &[vessel]));
        }
        let source_record = self.entity(source)?;
        let attached = source_record.parent_obj.is_some();
        let Some(state) = source_record.kind.as_liquid().cloned() else {
            return Err(self.reject("fill", ErrorKind::NotALiquid(source), &[source]));
        };
        if !state.can_fill_from || (attached && !state.infinite_well) {
            return Ok(FillOutcome::Rejected);
        }

        if let Some(present) = self.contains_liquid(vessel) {
            if present == source || self.liquid_room_left(vessel) == 0 {
                return Ok(FillOutcome::AlreadyFull);
            }
            let same_type = self
                .entities
                .get(present)
                .and_then(|entity| entity.kind.as_liquid())
                .is_some_and(|held| held.liquid_type == state.liquid_type);
            if same_type {
                return Ok(FillOutcome::AlreadyFull);
            }
            let outcome = match policy.mix(self, present, source) {
                Some(result) => {
                    self.trace(|world| {
                        Some(TraceEvent::LiquidMixed {
                            result: world.subject(result)?,
                            vessel: world.subject(vessel)?,
                        })
                    });
                    FillOutcome::Mixed(result)
                }
                None => FillOutcome::Rejected,
            };
            self.check("fill");
            return Ok(outcome);
        }

        if state.infinite_well {
            let template = state
                .transfer
                .filter(|template| self.entities.exists(*template))
                .unwrap_or(source);
            let copy = self.copy_entity(template)?;
            if let Some(liquid) = self
                .entities
                .get_mut(copy)
                .and_then(|entity| entity.kind.as_liquid_mut())
            {
                liquid.infinite_well = false;
                liquid.transfer = None;
            }
            self.place(vessel, copy);
            self.trace(|world| {
                Some(TraceEvent::LiquidCopied {
                    source: world.subject(source)?,
                    copy: world.subject(copy)?,
                    vessel: world.subject(vessel)?,
                })
            });
            self.check("fill");
            return Ok(FillOutcome::Copied(copy));
        }

        if let Some(location) = self.location(source) {
            self.unplace(location, source);
        }
        self.place(vessel, source);
        self.trace(|world| {
            Some(TraceEvent::LiquidMoved {
                liquid: world.subject(source)?,
                vessel: world.subject(vessel)?,
            })
        });
        self.check("fill");
        Ok(FillOutcome::Moved)
    }

    /// Pours a liquid out of its vessel onto the outermost surrounding
    /// location, where it can no longer be collected or carried.
    ///
    /// Returns false if the liquid is not in a container, may not be poured
    /// out, or the vessel is itself the outermost location. An outermost
    /// container that already holds a liquid refuses the spill.
    pub fn dump(&mut self, liquid: EntityId) -> bool {
        let Some(entity) = self.entities.get(liquid) else {
            return false;
        };
        let (Some(state), Some(vessel)) = (entity.kind.as_liquid(), entity.location) else {
            return false;
        };
        let in_container = self
            .entities
            .get(vessel)
            .is_some_and(|holder| matches!(holder.kind, Kind::Container { .. }));
        if !in_container || !state.can_pour_out {
            return false;
        }
        if entity.parent_obj.is_some() {
            return false;
        }
        let Some(ground) = self.outermost_location(liquid).filter(|root| *root != vessel) else {
            return false;
        };
        let ground_is_container = self
            .entities
            .get(ground)
            .is_some_and(|holder| matches!(holder.kind, Kind::Container { .. }));
        if ground_is_container && self.contains_liquid(ground).is_some() {
            return false;
        }
        let spilled = format!(
            "{} has been spilled on the ground here. ",
            entity.noun.capitalized_with_article(true)
        );

        self.unplace(vessel, liquid);
        self.place(ground, liquid);
        if let Some(entity) = self.entities.get_mut(liquid) {
            entity.inv_item = false;
            entity.text.base_desc = spilled;
            if let Some(state) = entity.kind.as_liquid_mut() {
                state.can_fill_from = false;
            }
        }
        self.refresh(liquid);
        self.refresh(ground);
        self.trace(|world| {
            Some(TraceEvent::LiquidSpilled {
                liquid: world.subject(liquid)?,
                location: world.subject(ground)?,
            })
        });
        self.check("dump");
        true
    }

    /// Drinks a liquid, removing it from its vessel.
    ///
    /// Returns false if the liquid is undrinkable or not in anything.
    pub fn drink(&mut self, liquid: EntityId) -> bool {
        let Some(entity) = self.entities.get(liquid) else {
            return false;
        };
        let drinkable = entity.kind.as_liquid().is_some_and(|state| state.can_drink)
            && entity.parent_obj.is_none();
        let Some(location) = entity.location.filter(|_| drinkable) else {
            return false;
        };
        let removed = self.unplace(location, liquid);
        self.check("drink");
        removed
    }
}
