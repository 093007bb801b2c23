//! Integration tests for the visibility composer
//!
//! Tests contents sentences, state text, and knowledge tracking.

use cupboard_foundation::Noun;
use cupboard_storage::{Blueprint, Kind, World, WorldConfig};

use crate::common::{spawn, spawn_in};

// =============================================================================
// Contents Sentences
// =============================================================================

#[test]
fn lists_follow_first_insertion_order() {
    let mut world = World::new();
    let table = spawn(&mut world, "table", Kind::Surface);
    spawn_in(&mut world, table, "plate", Kind::Thing);
    let fork = spawn_in(&mut world, table, "fork", Kind::Thing);
    spawn_in(&mut world, table, "knife", Kind::Thing);
    let second_fork = world.copy_entity(fork).unwrap();
    world.add(table, second_fork).unwrap();

    assert_eq!(
        world.contents_desc(table).unwrap(),
        " On the table are a plate, 2 forks and a knife."
    );
}

#[test]
fn verbose_names_and_irregular_plurals() {
    let mut world = World::new();
    let drawer = spawn(&mut world, "drawer", Kind::container());
    let knife = world
        .spawn(
            Blueprint::new("knife", Kind::Thing)
                .noun(Noun::new("knife").with_verbose_name("butter knife").with_plural("butter knives")),
        )
        .unwrap();
    let other = world.copy_entity(knife).unwrap();
    world.add(drawer, knife).unwrap();
    world.add(drawer, other).unwrap();
    assert_eq!(
        world.contents_desc(drawer).unwrap(),
        " In the drawer are 2 butter knives."
    );
}

#[test]
fn empty_holders_have_no_sentence() {
    let mut world = World::new();
    let table = spawn(&mut world, "table", Kind::Surface);
    let plate = spawn_in(&mut world, table, "plate", Kind::Thing);
    world.remove(table, plate);
    assert_eq!(world.contents_desc(table).unwrap(), "");
    assert_eq!(world.desc(table).unwrap(), "There is a table here. ");
}

#[test]
fn under_space_sentence_appears_once_revealed() {
    let mut world = World::new();
    let room = spawn(&mut world, "room", Kind::Room);
    let under = spawn_in(&mut world, room, "under_bed", Kind::under_space());
    spawn_in(&mut world, under, "slipper", Kind::Thing);
    assert_eq!(world.contents_desc(under).unwrap(), "");

    world.reveal(under);
    assert_eq!(
        world.contents_desc(under).unwrap(),
        " Under the under_bed is a slipper."
    );
}

#[test]
fn opening_updates_sentence_and_state() {
    let mut world = World::new();
    let chest = spawn(&mut world, "chest", Kind::lidded(false));
    spawn_in(&mut world, chest, "coin", Kind::Thing);
    assert_eq!(
        world.contents_desc(chest).unwrap(),
        "You cannot see inside the chest as it is closed."
    );

    world.open(chest);
    assert_eq!(world.contents_desc(chest).unwrap(), " In the chest is a coin.");
    assert_eq!(
        world.xdesc(chest).unwrap(),
        "There is a chest here.  It is currently open.  In the chest is a coin."
    );
}

#[test]
fn npcs_are_listed_but_the_player_is_not() {
    let mut world = World::new();
    let bench = spawn(&mut world, "bench", Kind::Surface);
    spawn_in(&mut world, bench, "sailor", Kind::npc());
    spawn_in(&mut world, bench, "me", Kind::player());
    assert_eq!(
        world.contents_desc(bench).unwrap(),
        " On the bench is a sailor. You are on the bench."
    );
}

// =============================================================================
// Knowledge
// =============================================================================

#[test]
fn hidden_things_stay_unknown() {
    let mut world = World::new();
    let chest = spawn(&mut world, "chest", Kind::lidded(false));
    let coin = spawn_in(&mut world, chest, "coin", Kind::Thing);
    let ix = world.entity(coin).unwrap().ix;
    assert!(!world.known().knows(ix));
    world.open(chest);
    assert!(world.known().knows(ix));
}

#[test]
fn knowledge_can_be_switched_off() {
    let mut world = World::with_config(WorldConfig::new().with_track_knowledge(false));
    let tray = spawn(&mut world, "tray", Kind::Surface);
    spawn_in(&mut world, tray, "cup", Kind::Thing);
    assert!(world.known().is_empty());
}
