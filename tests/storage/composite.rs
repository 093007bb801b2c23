//! Integration tests for composite objects

use cupboard_foundation::ErrorKind;
use cupboard_storage::{Blueprint, Kind, World};

use crate::common::{spawn, spawn_in};

#[test]
fn under_space_moves_with_bed() {
    let mut world = World::new();
    let bedroom = spawn(&mut world, "bedroom", Kind::Room);
    let landing = spawn(&mut world, "landing", Kind::Room);
    let bed = spawn_in(&mut world, bedroom, "bed", Kind::Surface);
    let under = spawn(&mut world, "under_bed", Kind::under_space());
    world.attach(bed, under).unwrap();
    let slipper = spawn_in(&mut world, under, "slipper", Kind::Thing);

    world.reveal(under);
    assert!(world.is_visible_from(bedroom, slipper));

    world.relocate(bed, landing).unwrap();
    assert_eq!(world.location(under), Some(landing));
    assert_eq!(world.location(slipper), Some(under));
    assert!(world.is_visible_from(landing, slipper));
    assert!(!world.is_visible_from(bedroom, slipper));
    world.verify().unwrap();
}

#[test]
fn sub_objects_are_not_listed() {
    let mut world = World::new();
    let stage = spawn(&mut world, "stage", Kind::Surface);
    let desk = spawn_in(&mut world, stage, "desk", Kind::Surface);
    let drawer = spawn(&mut world, "drawer", Kind::lidded(false));
    world.attach(desk, drawer).unwrap();
    assert_eq!(world.location(drawer), Some(stage));
    assert_eq!(world.contents_desc(stage).unwrap(), " On the stage is a desk.");

    let lamp = spawn(&mut world, "lamp", Kind::Thing);
    world.add(desk, lamp).unwrap();
    assert_eq!(world.contents_desc(desk).unwrap(), " On the desk is a lamp.");
}

#[test]
fn child_state_flows_into_parent_text() {
    let mut world = World::new();
    let desk = spawn(&mut world, "desk", Kind::Surface);
    let drawer = world
        .spawn(Blueprint::new("drawer", Kind::lidded(false)).desc(" It has a drawer."))
        .unwrap();
    world.describe(desk, "A desk.").unwrap();
    world.set_reveal(drawer, false, true).unwrap();
    world.attach(desk, drawer).unwrap();
    assert!(world.desc(desk).unwrap().contains(" It is currently closed. "));

    world.open(drawer);
    assert!(world.desc(desk).unwrap().contains(" It is currently open. "));
}

#[test]
fn cannot_attach_into_own_contents() {
    let mut world = World::new();
    let chest = spawn(&mut world, "chest", Kind::lidded(true));
    let tray = spawn_in(&mut world, chest, "tray", Kind::Surface);
    let err = world.attach(tray, chest).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ContainmentCycle { .. }));
    assert!(world.entity(chest).unwrap().parent_obj.is_none());
}
