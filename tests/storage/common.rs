//! Shared world-building helpers.

use cupboard_foundation::EntityId;
use cupboard_storage::{Blueprint, Kind, World};

pub fn spawn(world: &mut World, ix: &str, kind: Kind) -> EntityId {
    world.spawn(Blueprint::new(ix, kind)).unwrap()
}

pub fn spawn_in(world: &mut World, container: EntityId, ix: &str, kind: Kind) -> EntityId {
    let id = spawn(world, ix, kind);
    world.add(container, id).unwrap();
    id
}
