//! A candle carried down into the cellar.

use cupboard_storage::{Kind, World};

use crate::{sees, spawn, spawn_in};

#[test]
fn candle_gutters_after_its_last_turn() {
    let mut world = World::new();
    let cellar = spawn(&mut world, "cellar", Kind::Room);
    let you = spawn_in(&mut world, cellar, "you", Kind::player());
    let candle = spawn_in(&mut world, you, "candle", Kind::consumable_light(3));

    assert!(world.light(candle));
    let mut burnt_out_on = None;
    for turn in 1..=5 {
        world.begin_turn(turn);
        if world.consume_light(candle) {
            burnt_out_on = Some(turn);
        }
    }

    assert_eq!(burnt_out_on, Some(3));
    assert_eq!(world.is_lit(candle), Some(false));
    assert!(world.xdesc(candle).unwrap().contains(" It is burnt out. "));
    assert!(!world.light(candle));
    assert!(sees(&world, you, candle));
    world.verify().unwrap();
}

#[test]
fn lantern_on_a_shelf_keeps_its_state_when_moved() {
    let mut world = World::new();
    let cellar = spawn(&mut world, "cellar", Kind::Room);
    let shelf = spawn_in(&mut world, cellar, "shelf", Kind::Surface);
    let lantern = spawn_in(&mut world, shelf, "lantern", Kind::light_source());

    assert!(world.light(lantern));
    world.relocate(lantern, cellar).unwrap();
    assert_eq!(world.is_lit(lantern), Some(true));
    assert!(world.desc(lantern).unwrap().contains(" It is currently lit. "));

    assert!(world.extinguish(lantern));
    assert!(world.desc(lantern).unwrap().contains(" It is currently not lit. "));
    world.verify().unwrap();
}
