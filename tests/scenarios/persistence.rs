//! Saving and restoring a world mid-game.

#![cfg(feature = "serde")]

use cupboard_storage::{Kind, World, WorldConfig};

use crate::{sees, spawn, spawn_in};

#[test]
fn restored_world_keeps_indexes_and_text() {
    let mut world = World::new();
    let study = spawn(&mut world, "study", Kind::Room);
    let cabinet = spawn_in(&mut world, study, "cabinet", Kind::lidded(true));
    let box_ = spawn_in(&mut world, cabinet, "box", Kind::lidded(false));
    let coin = spawn_in(&mut world, box_, "coin", Kind::Thing);
    world.begin_turn(12);

    let bytes = world.to_bytes().unwrap();
    let mut restored = World::from_bytes(&bytes, WorldConfig::new()).unwrap();
    restored.verify().unwrap();
    assert_eq!(restored.turn(), 12);
    assert!(!sees(&restored, study, coin));
    assert_eq!(restored.desc(cabinet).unwrap(), world.desc(cabinet).unwrap());

    assert!(restored.open(box_));
    assert!(sees(&restored, study, coin));
    assert!(!sees(&world, study, coin));
}
