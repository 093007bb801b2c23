//! End-to-end scenarios
//!
//! Each module builds a small room and plays through the moves a player
//! would make, checking indexes and text after every step.

mod lamp;
mod liquids;
mod persistence;

use cupboard_foundation::EntityId;
use cupboard_storage::{Blueprint, Kind, World};

pub fn spawn(world: &mut World, ix: &str, kind: Kind) -> EntityId {
    world.spawn(Blueprint::new(ix, kind)).unwrap()
}

pub fn spawn_in(world: &mut World, holder: EntityId, ix: &str, kind: Kind) -> EntityId {
    let id = spawn(world, ix, kind);
    world.add(holder, id).unwrap();
    id
}

pub fn sees(world: &World, holder: EntityId, entity: EntityId) -> bool {
    world.is_visible_from(holder, entity)
}
