//! Integration tests for World state management
//!
//! Tests world creation, handles, copies, destruction, and cheap cloning.

use cupboard_foundation::ErrorKind;
use cupboard_storage::{Blueprint, Kind, World, WorldConfig};

use crate::common::{spawn, spawn_in};

// =============================================================================
// World Creation
// =============================================================================

#[test]
fn world_starts_empty() {
    let world = World::new();
    assert_eq!(world.entity_count(), 0);
    assert_eq!(world.turn(), 0);
    assert!(world.known().is_empty());
}

#[test]
fn world_uses_configured_sizes() {
    let mut world = World::with_config(WorldConfig::new().with_sizes(2, 20));
    let bag = spawn(&mut world, "bag", Kind::container());
    let pebble = spawn(&mut world, "pebble", Kind::Thing);
    assert_eq!(world.entity(bag).unwrap().size, 20);
    assert_eq!(world.entity(pebble).unwrap().size, 2);
}

#[test]
fn blueprint_overrides_defaults() {
    let mut world = World::new();
    let anvil = world
        .spawn(
            Blueprint::new("anvil", Kind::Thing)
                .size(40)
                .inv_item(false)
                .synonym("block")
                .desc("A heavy anvil squats here. "),
        )
        .unwrap();
    let record = world.entity(anvil).unwrap();
    assert_eq!(record.size, 40);
    assert!(!record.inv_item);
    assert!(record.synonyms.contains(&world.word("block").unwrap()));
    assert_eq!(world.desc(anvil).unwrap(), "A heavy anvil squats here. ");
}

// =============================================================================
// Handles
// =============================================================================

#[test]
fn destroyed_handles_are_stale() {
    let mut world = World::new();
    let coin = spawn(&mut world, "coin", Kind::Thing);
    world.destroy(coin).unwrap();
    let key = spawn(&mut world, "key", Kind::Key);
    assert_eq!(coin.index, key.index);
    let err = world.entity(coin).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(_)));
}

#[test]
fn placed_entities_cannot_be_destroyed() {
    let mut world = World::new();
    let room = spawn(&mut world, "room", Kind::Room);
    let coin = spawn_in(&mut world, room, "coin", Kind::Thing);

    let err = world.destroy(coin).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StillPlaced(_)));
    let err = world.destroy(room).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StillPlaced(_)));

    assert!(world.remove(room, coin));
    world.destroy(coin).unwrap();
    world.destroy(room).unwrap();
    assert_eq!(world.entity_count(), 0);
}

#[test]
fn removal_on_stale_handle_reports_false() {
    let mut world = World::new();
    let room = spawn(&mut world, "room", Kind::Room);
    let coin = spawn(&mut world, "coin", Kind::Thing);
    world.destroy(coin).unwrap();
    assert!(!world.remove(room, coin));
}

// =============================================================================
// Speculation
// =============================================================================

#[test]
fn clones_are_independent() {
    let mut world = World::new();
    let room = spawn(&mut world, "room", Kind::Room);
    let coin = spawn_in(&mut world, room, "coin", Kind::Thing);

    let mut attempt = world.clone();
    assert!(attempt.remove(room, coin));

    assert_eq!(world.location(coin), Some(room));
    assert_eq!(attempt.location(coin), None);
    world.verify().unwrap();
    attempt.verify().unwrap();
}
