//! Two-sided doors.

use cupboard_foundation::{EntityId, ErrorKind, Result};

use crate::kind::Kind;
use crate::trace::TraceEvent;
use crate::world::World;

impl World {
    /// Pairs two door sides and brings the second to the first's state.
    ///
    /// A side already paired elsewhere is unpaired from its old twin.
    ///
    /// # Errors
    ///
    /// Returns `NotADoor` if either entity is not a door side.
    pub fn pair_doors(&mut self, first: EntityId, second: EntityId) -> Result<()> {
        let mut state = None;
        for id in [first, second] {
            match self.entity(id)?.kind {
                Kind::Door { is_open } => {
                    state.get_or_insert(is_open);
                }
                _ => return Err(self.reject("pair_doors", ErrorKind::NotADoor(id), &[id])),
            }
        }
        for (side, twin) in [(first, second), (second, first)] {
            let old = self.entity_mut(side)?.twin.replace(twin);
            if let Some(old) = old.filter(|old| *old != twin) {
                if let Some(record) = self.entities.get_mut(old) {
                    record.twin = None;
                }
            }
        }
        if let Some(open) = state {
            self.set_door_open(second, open);
        }
        self.check("pair_doors");
        Ok(())
    }

    /// Whether a door side or lidded container is open. `None` for anything
    /// else.
    #[must_use]
    pub fn is_open(&self, id: EntityId) -> Option<bool> {
        match self.entities.get(id)?.kind {
            Kind::Door { is_open } | Kind::Container {
                lid: Some(is_open), ..
            } => Some(is_open),
            _ => None,
        }
    }

    /// Sets one side, then mirrors onto the twin if it differs.
    pub(crate) fn set_door_open(&mut self, door: EntityId, open: bool) -> bool {
        let Some(record) = self.entities.get_mut(door) else {
            return false;
        };
        match &mut record.kind {
            Kind::Door { is_open } if *is_open != open => *is_open = open,
            _ => return false,
        }
        let parent = record.parent_obj;
        let twin = record.twin;

        self.refresh(door);
        if let Some(parent) = parent {
            self.refresh(parent);
        }
        self.trace(|world| {
            Some(TraceEvent::DoorChanged {
                door: world.subject(door)?,
                open,
            })
        });
        if let Some(twin) = twin {
            self.set_door_open(twin, open);
        }
        true
    }
}
