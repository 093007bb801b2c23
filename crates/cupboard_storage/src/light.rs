//! Lamps, candles and other light sources.
//!
//! A consumable light burns down by one turn each time the turn loop calls
//! [`World::consume_light`] while it is lit. At zero it goes out and cannot be
//! relit.

use cupboard_foundation::EntityId;

use crate::kind::Kind;
use crate::trace::TraceEvent;
use crate::world::World;

impl World {
    /// Lights a light source.
    ///
    /// Returns false when it is already lit, burnt out, or not a light.
    pub fn light(&mut self, id: EntityId) -> bool {
        let changed = self.set_lit(id, true);
        self.check("light");
        changed
    }

    /// Puts a light source out. Returns false when it was not lit.
    pub fn extinguish(&mut self, id: EntityId) -> bool {
        let changed = self.set_lit(id, false);
        self.check("extinguish");
        changed
    }

    /// Whether a light source is burning. `None` for anything else.
    #[must_use]
    pub fn is_lit(&self, id: EntityId) -> Option<bool> {
        match self.entities.get(id)?.kind {
            Kind::LightSource { is_lit, .. } => Some(is_lit),
            _ => None,
        }
    }

    /// Turns of light a consumable has left. `None` for a light that never
    /// burns out, and for anything that is not a light.
    #[must_use]
    pub fn turns_left(&self, id: EntityId) -> Option<u32> {
        match self.entities.get(id)?.kind {
            Kind::LightSource {
                consumable: true,
                turns_left,
                ..
            } => Some(turns_left),
            _ => None,
        }
    }

    /// Spends one turn of a lit consumable light.
    ///
    /// Returns true only on the turn it burns out, so the caller can report
    /// it. Unlit and non-consumable lights are left alone.
    pub fn consume_light(&mut self, id: EntityId) -> bool {
        let Some(record) = self.entities.get_mut(id) else {
            return false;
        };
        let burnt_out = match &mut record.kind {
            Kind::LightSource {
                is_lit,
                consumable: true,
                turns_left,
            } if *is_lit => {
                *turns_left = turns_left.saturating_sub(1);
                if *turns_left == 0 {
                    *is_lit = false;
                }
                !*is_lit
            }
            _ => return false,
        };
        if burnt_out {
            let parent = record.parent_obj;
            self.refresh_light(id, parent);
            self.trace(|world| {
                Some(TraceEvent::LightBurntOut {
                    light: world.subject(id)?,
                })
            });
        }
        self.check("consume_light");
        burnt_out
    }

    fn set_lit(&mut self, id: EntityId, lit: bool) -> bool {
        let Some(record) = self.entities.get_mut(id) else {
            return false;
        };
        match &mut record.kind {
            Kind::LightSource {
                is_lit,
                consumable,
                turns_left,
            } if *is_lit != lit && !(lit && *consumable && *turns_left == 0) => *is_lit = lit,
            _ => return false,
        }
        let parent = record.parent_obj;
        self.refresh_light(id, parent);
        self.trace(|world| {
            Some(TraceEvent::LightChanged {
                light: world.subject(id)?,
                lit,
            })
        });
        true
    }

    fn refresh_light(&mut self, id: EntityId, parent: Option<EntityId>) {
        self.refresh(id);
        if let Some(parent) = parent {
            self.refresh(parent);
        }
    }
}
