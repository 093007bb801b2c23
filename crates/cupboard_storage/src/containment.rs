//! The containment index maintainer.
//!
//! Every holder keeps two indexes: `contains` (direct contents) and
//! `sub_contains` (everything beneath it that it can see). An entity's
//! *contribution* is itself plus, when it exposes its contents, its own
//! `sub_contains`. Adding or removing an entity pushes its contribution into
//! or out of the new parent and every ancestor that can see through the chain
//! of holders above it.
//!
//! Bound locks and attached sub-objects travel with their host: they are
//! placed before it and removed before it.

use cupboard_foundation::{EntityId, ErrorKind, Ix, Result, join_list};

use crate::entity::Entity;
use crate::kind::Kind;
use crate::trace::TraceEvent;
use crate::world::World;

/// What [`World::move_contents_out`] moved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovedOut {
    /// English list of what moved ("a coin and 2 keys").
    pub list: String,
    /// Whether more than one thing moved.
    pub plural: bool,
    /// Moved entities, in listing order.
    pub moved: Vec<EntityId>,
}

impl World {
    /// Places an unplaced entity in a holder.
    ///
    /// The entity's bound lock and attached sub-objects are placed in the same
    /// holder first.
    ///
    /// # Errors
    ///
    /// Returns `NotAHolder` if `container` holds nothing, `AlreadyPlaced` if
    /// the entity has a location (move with [`World::relocate`]),
    /// `ContainmentCycle` if the entity or something attached to it would end
    /// up inside itself, `VesselFull` for a second liquid in one container
    /// (merge with [`World::fill_with`]) and `TravelsWithHost` for a bound
    /// lock or attached sub-object.
    pub fn add(&mut self, container: EntityId, entity: EntityId) -> Result<()> {
        self.entities.validate(container)?;
        self.ensure_free_standing("add", entity)?;
        if let Some(location) = self.entity(entity)?.location {
            return Err(self.reject(
                "add",
                ErrorKind::AlreadyPlaced { entity, location },
                &[entity, container],
            ));
        }
        self.admit("add", container, entity)?;
        self.place(container, entity);
        self.check("add");
        Ok(())
    }

    /// Removes an entity from a holder.
    ///
    /// Returns false, changing nothing, if the entity is not a direct child of
    /// the holder or is itself a bound lock or attached sub-object. Those
    /// leave with their host.
    pub fn remove(&mut self, container: EntityId, entity: EntityId) -> bool {
        if !self.entities.exists(container) {
            return false;
        }
        match self.entities.get(entity) {
            Some(record) if record.parent_obj.is_none() => {}
            _ => return false,
        }
        let removed = self.unplace(container, entity);
        self.check("remove");
        removed
    }

    /// Moves an entity from wherever it is into a holder: remove, then add.
    ///
    /// # Errors
    ///
    /// Same as [`World::add`]. On error the entity stays where it was.
    pub fn relocate(&mut self, entity: EntityId, destination: EntityId) -> Result<()> {
        self.entities.validate(destination)?;
        self.ensure_free_standing("relocate", entity)?;
        self.admit("relocate", destination, entity)?;
        if let Some(location) = self.location(entity) {
            if location == destination {
                return Ok(());
            }
            self.unplace(location, entity);
        }
        self.place(destination, entity);
        self.check("relocate");
        Ok(())
    }

    /// Opens a lidded container or a door. Returns false if it was already
    /// open or cannot be opened.
    pub fn open(&mut self, id: EntityId) -> bool {
        let changed = match self.entities.get(id).map(|entity| &entity.kind) {
            Some(Kind::Door { .. }) => self.set_door_open(id, true),
            Some(Kind::Container {
                lid: Some(false), ..
            }) => self.set_exposed(id, true),
            _ => false,
        };
        self.check("open");
        changed
    }

    /// Closes a lidded container or a door. Returns false if it was already
    /// closed or cannot be closed.
    pub fn close(&mut self, id: EntityId) -> bool {
        let changed = match self.entities.get(id).map(|entity| &entity.kind) {
            Some(Kind::Door { .. }) => self.set_door_open(id, false),
            Some(Kind::Container { lid: Some(true), .. }) => self.set_exposed(id, false),
            _ => false,
        };
        self.check("close");
        changed
    }

    /// Reveals an under-space. Returns false if it was already revealed.
    pub fn reveal(&mut self, id: EntityId) -> bool {
        let changed = match self.entities.get(id).map(|entity| &entity.kind) {
            Some(Kind::UnderSpace { revealed: false }) => self.set_exposed(id, true),
            _ => false,
        };
        self.check("reveal");
        changed
    }

    /// Hides an under-space again. Returns false if it was already hidden.
    pub fn hide(&mut self, id: EntityId) -> bool {
        let changed = match self.entities.get(id).map(|entity| &entity.kind) {
            Some(Kind::UnderSpace { revealed: true }) => self.set_exposed(id, false),
            _ => false,
        };
        self.check("hide");
        changed
    }

    /// Gives a container a lid, closed, hiding what it holds.
    ///
    /// # Errors
    ///
    /// Returns `NotAContainer` for anything but a container.
    pub fn give_lid(&mut self, id: EntityId) -> Result<()> {
        let kind = &mut self.entity_mut(id)?.kind;
        match kind {
            Kind::Container { lid: Some(false), .. } => {}
            Kind::Container { lid, .. } => {
                // Open first so the close below hides what was exposed
                *lid = Some(true);
                self.set_exposed(id, false);
            }
            _ => return Err(self.reject("give_lid", ErrorKind::NotAContainer(id), &[id])),
        }
        self.refresh(id);
        self.check("give_lid");
        Ok(())
    }

    /// Moves everything directly in a holder to the holder's own location.
    ///
    /// Entities attached to or guarding something else in the holder travel
    /// with it and are not listed. An unplaced holder moves nothing, and a
    /// liquid stays behind when the destination container already has one.
    ///
    /// # Errors
    ///
    /// Returns `NotAHolder` if the entity holds nothing.
    pub fn move_contents_out(&mut self, id: EntityId) -> Result<MovedOut> {
        let holdings = self.holdings(id)?;
        let Some(destination) = self.location(id) else {
            return Ok(MovedOut::default());
        };
        let all: Vec<EntityId> = holdings.contains.ids().collect();
        let container_destination = self
            .entities
            .get(destination)
            .is_some_and(|holder| matches!(holder.kind, Kind::Container { .. }));
        let mut liquid_room = self.contains_liquid(destination).is_none();
        let mut movers = Vec::new();
        for member in &all {
            let Some(entity) = self.entities.get(*member) else {
                continue;
            };
            if entity.parent_obj.is_some_and(|parent| all.contains(&parent)) {
                continue;
            }
            if matches!(entity.kind, Kind::Liquid(_)) && container_destination {
                if !liquid_room {
                    continue;
                }
                liquid_room = false;
            }
            movers.push(*member);
        }

        let list = self.list_names(&movers);
        for member in &movers {
            self.unplace(id, *member);
            self.place(destination, *member);
        }
        self.check("move_contents_out");
        Ok(MovedOut {
            list,
            plural: movers.len() > 1,
            moved: movers,
        })
    }

    /// Entities visible directly beneath an entity: everything in its
    /// `sub_contains`, or nothing when it conceals what it holds.
    #[must_use]
    pub fn get_nested(&self, id: EntityId) -> Vec<EntityId> {
        match self.entities.get(id) {
            Some(entity) if !entity.kind.conceals() => entity
                .holdings
                .as_ref()
                .map(|holdings| holdings.sub_contains.ids().collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// The top of an entity's location chain, or `None` if it is unplaced.
    #[must_use]
    pub fn outermost_location(&self, id: EntityId) -> Option<EntityId> {
        let mut current = self.location(id)?;
        while let Some(parent) = self.location(current) {
            current = parent;
        }
        Some(current)
    }

    /// Everything visible from the outermost location of an entity.
    #[must_use]
    pub fn visible_from(&self, id: EntityId) -> Vec<EntityId> {
        self.outermost_location(id)
            .and_then(|root| self.holdings(root).ok())
            .map(|holdings| holdings.sub_contains.ids().collect())
            .unwrap_or_default()
    }

    /// Whether `entity` appears in `holder`'s `sub_contains`.
    #[must_use]
    pub fn is_visible_from(&self, holder: EntityId, entity: EntityId) -> bool {
        let Some(ix) = self.entities.get(entity).map(|record| record.ix) else {
            return false;
        };
        self.holdings(holder)
            .is_ok_and(|holdings| holdings.sub_contains.contains(ix, entity))
    }

    /// Whether `ancestor` is somewhere on `entity`'s location chain.
    #[must_use]
    pub fn is_within(&self, entity: EntityId, ancestor: EntityId) -> bool {
        let mut current = self.location(entity);
        while let Some(holder) = current {
            if holder == ancestor {
                return true;
            }
            current = self.location(holder);
        }
        false
    }

    /// Rejects bound locks and attached sub-objects, which only move with
    /// their host.
    fn ensure_free_standing(&mut self, operation: &'static str, entity: EntityId) -> Result<()> {
        match self.entity(entity)?.parent_obj {
            Some(host) => Err(self.reject(
                operation,
                ErrorKind::TravelsWithHost { entity, host },
                &[entity, host],
            )),
            None => Ok(()),
        }
    }

    /// Checks that `container` can take `entity`: it holds things, the move
    /// makes no cycle, and a container never ends up with two liquids.
    fn admit(&mut self, operation: &'static str, container: EntityId, entity: EntityId) -> Result<()> {
        let target = self.entity(container)?;
        if !target.kind.is_holder() {
            return Err(self.reject(operation, ErrorKind::NotAHolder(container), &[container]));
        }
        let is_container = matches!(target.kind, Kind::Container { .. });
        if self.would_cycle(container, entity) {
            return Err(self.reject(
                operation,
                ErrorKind::ContainmentCycle { entity, container },
                &[entity, container],
            ));
        }
        let incoming_liquid = matches!(self.entity(entity)?.kind, Kind::Liquid(_));
        if is_container && incoming_liquid {
            if let Some(liquid) = self
                .contains_liquid(container)
                .filter(|present| *present != entity)
            {
                return Err(self.reject(
                    operation,
                    ErrorKind::VesselFull { container, liquid },
                    &[entity, container],
                ));
            }
        }
        Ok(())
    }

    /// Entity, bound lock and attached sub-objects, transitively.
    pub(crate) fn travelling_with(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = vec![id];
        let mut next = 0;
        while let Some(current) = out.get(next).copied() {
            next += 1;
            let Some(entity) = self.entities.get(current) else {
                continue;
            };
            for dependent in entity.lock_obj.iter().chain(entity.children()) {
                if !out.contains(dependent) {
                    out.push(*dependent);
                }
            }
        }
        out
    }

    /// Whether placing `entity` in `container` would put anything travelling
    /// with it inside itself.
    pub(crate) fn would_cycle(&self, container: EntityId, entity: EntityId) -> bool {
        self.travelling_with(entity)
            .iter()
            .any(|mover| *mover == container || self.is_within(container, *mover))
    }

    /// The entity plus what it lets its ancestors see.
    pub(crate) fn contribution(&self, id: EntityId) -> Vec<(Ix, EntityId)> {
        let Some(entity) = self.entities.get(id) else {
            return Vec::new();
        };
        let mut out = vec![(entity.ix, id)];
        if entity.kind.exposes_contents() {
            if let Some(holdings) = &entity.holdings {
                out.extend(
                    holdings
                        .sub_contains
                        .groups()
                        .flat_map(|(ix, group)| group.iter().map(move |member| (ix, *member))),
                );
            }
        }
        out
    }

    /// Ancestors that see what `start` exposes: its parent, then further up
    /// for as long as each holder reached exposes its own contents.
    pub(crate) fn ancestors_seeing(&self, start: EntityId) -> Vec<EntityId> {
        let mut out = Vec::new();
        let mut current = self.location(start);
        while let Some(holder) = current {
            out.push(holder);
            match self.entities.get(holder) {
                Some(entity) if entity.kind.exposes_contents() => current = entity.location,
                _ => break,
            }
        }
        out
    }

    /// Indexes that receive whatever enters `container`.
    fn targets(&self, container: EntityId) -> Vec<EntityId> {
        let mut targets = vec![container];
        if self
            .entities
            .get(container)
            .is_some_and(|entity| entity.kind.exposes_contents())
        {
            targets.extend(self.ancestors_seeing(container));
        }
        targets
    }

    fn index_sub(&mut self, targets: &[EntityId], items: &[(Ix, EntityId)], insert: bool) {
        for target in targets {
            let Some(holdings) = self
                .entities
                .get_mut(*target)
                .and_then(|entity| entity.holdings.as_mut())
            else {
                continue;
            };
            for (ix, member) in items {
                if insert {
                    holdings.sub_contains.insert(*ix, *member);
                } else {
                    holdings.sub_contains.remove(*ix, *member);
                }
            }
        }
    }

    /// Places without validation. Callers have ruled out cycles and
    /// existing locations.
    pub(crate) fn place(&mut self, container: EntityId, entity: EntityId) {
        let Some(record) = self.entities.get(entity) else {
            return;
        };
        let dependents: Vec<EntityId> =
            record.lock_obj.iter().chain(record.children()).copied().collect();
        for dependent in dependents {
            match self.location(dependent) {
                Some(location) if location == container => continue,
                Some(location) => {
                    self.unplace(location, dependent);
                }
                None => {}
            }
            self.place(container, dependent);
        }

        let Some(record) = self.entities.get_mut(entity) else {
            return;
        };
        record.location = Some(container);
        let ix = record.ix;

        let targets = self.targets(container);
        let items = self.contribution(entity);
        self.index_sub(&targets, &items, true);
        if let Some(holdings) = self
            .entities
            .get_mut(container)
            .and_then(|record| record.holdings.as_mut())
        {
            holdings.contains.insert(ix, entity);
        }
        self.refresh(container);
        self.trace(|world| {
            Some(TraceEvent::Placed {
                entity: world.subject(entity)?,
                container: world.subject(container)?,
            })
        });
    }

    /// Removes without the public wrapper's checks.
    pub(crate) fn unplace(&mut self, container: EntityId, entity: EntityId) -> bool {
        let Some(ix) = self.entities.get(entity).map(|record| record.ix) else {
            return false;
        };
        let present = self
            .holdings(container)
            .is_ok_and(|holdings| holdings.contains.contains(ix, entity));
        if !present {
            self.trace(|world| {
                Some(TraceEvent::RemoveMissed {
                    entity: world.subject(entity)?,
                    container: world.subject(container)?,
                })
            });
            return false;
        }

        let dependents: Vec<EntityId> = self
            .entities
            .get(entity)
            .map(|record| record.lock_obj.iter().chain(record.children()).copied().collect())
            .unwrap_or_default();
        for dependent in dependents {
            if self.location(dependent) == Some(container) {
                self.unplace(container, dependent);
            }
        }

        let targets = self.targets(container);
        let items = self.contribution(entity);
        self.index_sub(&targets, &items, false);
        if let Some(holdings) = self
            .entities
            .get_mut(container)
            .and_then(|record| record.holdings.as_mut())
        {
            holdings.contains.remove(ix, entity);
        }
        if let Some(record) = self.entities.get_mut(entity) {
            record.location = None;
        }
        self.refresh(container);
        self.trace(|world| {
            Some(TraceEvent::Removed {
                entity: world.subject(entity)?,
                container: world.subject(container)?,
            })
        });
        true
    }

    /// Flips a lid or an under-space and pushes the holder's direct
    /// contributions into, or out of, every ancestor that sees it.
    pub(crate) fn set_exposed(&mut self, id: EntityId, exposed: bool) -> bool {
        let Some(record) = self.entities.get_mut(id) else {
            return false;
        };
        match &mut record.kind {
            Kind::Container { lid: Some(open), .. } if *open != exposed => *open = exposed,
            Kind::UnderSpace { revealed } if *revealed != exposed => *revealed = exposed,
            _ => return false,
        }
        let parent_obj = record.parent_obj;

        let children: Vec<EntityId> = self
            .holdings(id)
            .map(|holdings| holdings.contains.ids().collect())
            .unwrap_or_default();
        let items: Vec<(Ix, EntityId)> = children
            .iter()
            .flat_map(|child| self.contribution(*child))
            .collect();
        let targets = self.ancestors_seeing(id);
        self.index_sub(&targets, &items, exposed);

        self.refresh(id);
        if let Some(parent) = parent_obj {
            self.refresh(parent);
        }
        let count = items.len();
        self.trace(|world| {
            let holder = world.subject(id)?;
            Some(if exposed {
                TraceEvent::Revealed {
                    holder,
                    exposed: count,
                }
            } else {
                TraceEvent::Concealed {
                    holder,
                    hidden: count,
                }
            })
        });
        true
    }

    /// English list of entities grouped by identifier, in order.
    pub(crate) fn list_names(&self, ids: &[EntityId]) -> String {
        let mut groups: Vec<(Ix, Vec<&Entity>)> = Vec::new();
        for id in ids {
            let Some(entity) = self.entities.get(*id) else {
                continue;
            };
            match groups.iter_mut().find(|(ix, _)| *ix == entity.ix) {
                Some((_, members)) => members.push(entity),
                None => groups.push((entity.ix, vec![entity])),
            }
        }
        let items: Vec<String> = groups
            .iter()
            .filter_map(|(_, members)| match members.as_slice() {
                [] => None,
                [only] => Some(only.noun.with_article(false)),
                [first, ..] => Some(format!("{} {}", members.len(), first.noun.plural())),
            })
            .collect();
        join_list(&items)
    }
}
