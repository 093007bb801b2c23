//! Water, jugs, bowls and a well.

use cupboard_foundation::{EntityId, ErrorKind};
use cupboard_storage::{FillOutcome, Kind, LiquidState, MixPolicy, World};

use crate::{spawn, spawn_in};

fn water_instances(world: &World) -> usize {
    world
        .entities()
        .filter(|id| {
            world
                .entity(*id)
                .is_ok_and(|entity| matches!(&entity.kind, Kind::Liquid(state) if state.liquid_type == "water"))
        })
        .count()
}

#[test]
fn pouring_a_jug_into_an_empty_bowl() {
    let mut world = World::new();
    let kitchen = spawn(&mut world, "kitchen", Kind::Room);
    let jug = spawn_in(&mut world, kitchen, "jug", Kind::vessel());
    let bowl = spawn_in(&mut world, kitchen, "bowl", Kind::vessel());
    let water = spawn_in(&mut world, jug, "water", Kind::liquid("water"));

    assert_eq!(world.fill(water, bowl).unwrap(), FillOutcome::Moved);
    assert_eq!(world.contains_liquid(jug), None);
    assert_eq!(world.contains_liquid(bowl), Some(water));
    assert_eq!(world.contents(bowl).unwrap().len(), 1);
    assert_eq!(water_instances(&world), 1);
    assert_eq!(world.vessel_of(water), Some(bowl));

    // Again is a no-op
    assert_eq!(world.fill(water, bowl).unwrap(), FillOutcome::AlreadyFull);
    world.verify().unwrap();
}

#[test]
fn the_well_never_runs_dry() {
    let mut world = World::new();
    let yard = spawn(&mut world, "yard", Kind::Room);
    let well = spawn_in(&mut world, yard, "well", Kind::container());
    let spring = spawn_in(
        &mut world,
        well,
        "water",
        Kind::Liquid(LiquidState::new("water").infinite()),
    );
    let bucket = spawn_in(&mut world, yard, "bucket", Kind::vessel());
    let pail = spawn_in(&mut world, yard, "pail", Kind::vessel());

    let FillOutcome::Copied(first) = world.fill(spring, bucket).unwrap() else {
        panic!("expected a copy");
    };
    let FillOutcome::Copied(second) = world.fill(spring, pail).unwrap() else {
        panic!("expected a copy");
    };
    assert_ne!(first, second);
    assert_eq!(world.location(spring), Some(well));
    assert_eq!(water_instances(&world), 3);

    // Drawn water is ordinary water
    let drawn = world.entity(first).unwrap().kind.as_liquid().unwrap();
    assert!(!drawn.infinite_well);
    assert_eq!(world.fill(spring, bucket).unwrap(), FillOutcome::AlreadyFull);
    world.verify().unwrap();
}

#[test]
fn spilled_water_soaks_into_the_floor() {
    let mut world = World::new();
    let kitchen = spawn(&mut world, "kitchen", Kind::Room);
    let table = spawn_in(&mut world, kitchen, "table", Kind::Surface);
    let cup = spawn_in(&mut world, table, "cup", Kind::vessel());
    let water = spawn_in(&mut world, cup, "water", Kind::liquid("water"));

    assert!(world.dump(water));
    assert_eq!(world.location(water), Some(kitchen));
    assert!(world.contains_liquid(cup).is_none());
    assert_eq!(
        world.desc(water).unwrap(),
        "The water has been spilled on the ground here. "
    );
    let bowl = spawn_in(&mut world, kitchen, "bowl", Kind::vessel());
    assert_eq!(world.fill(water, bowl).unwrap(), FillOutcome::Rejected);
    assert!(!world.dump(water));
    world.verify().unwrap();
}

#[test]
fn two_spills_on_one_floor() {
    let mut world = World::new();
    let tavern = spawn(&mut world, "tavern", Kind::Room);
    let pond = spawn_in(&mut world, tavern, "pond", Kind::liquid("water"));
    let jug = spawn_in(&mut world, tavern, "jug", Kind::vessel());
    let cup = spawn_in(&mut world, tavern, "cup", Kind::vessel());
    let water = spawn_in(&mut world, jug, "water", Kind::liquid("water"));
    let ale = spawn_in(&mut world, cup, "ale", Kind::liquid("ale"));

    assert!(world.dump(water));
    assert!(world.dump(ale));
    for liquid in [pond, water, ale] {
        assert_eq!(world.location(liquid), Some(tavern));
    }
    assert!(world.contains_liquid(jug).is_none());
    assert!(world.contains_liquid(cup).is_none());
    world.verify().unwrap();
}

#[test]
fn a_full_bowl_turns_away_a_second_liquid() {
    let mut world = World::new();
    let kitchen = spawn(&mut world, "kitchen", Kind::Room);
    let bowl = spawn_in(&mut world, kitchen, "bowl", Kind::vessel());
    let water = spawn_in(&mut world, bowl, "water", Kind::liquid("water"));
    let ale = spawn_in(&mut world, kitchen, "ale", Kind::liquid("ale"));

    let err = world.relocate(ale, bowl).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::VesselFull { .. }));
    assert_eq!(world.contains_liquid(bowl), Some(water));
    assert_eq!(world.fill(ale, bowl).unwrap(), FillOutcome::Rejected);
    world.verify().unwrap();
}

#[test]
fn drinking_removes_the_instance() {
    let mut world = World::new();
    let cup = spawn(&mut world, "cup", Kind::vessel());
    let tea = spawn_in(&mut world, cup, "tea", Kind::liquid("tea"));
    assert!(world.drink(tea));
    assert_eq!(world.location(tea), None);
    assert!(!world.drink(tea));
    world.destroy(tea).unwrap();
    assert!(!world.exists(tea));
}

struct Dilute;

impl MixPolicy for Dilute {
    fn mix(&self, world: &mut World, base: EntityId, _mix_in: EntityId) -> Option<EntityId> {
        if let Ok(entity) = world.entity(base) {
            if entity.kind.as_liquid().is_some_and(|state| state.liquid_type == "juice") {
                return Some(base);
            }
        }
        None
    }
}

#[test]
fn mixing_is_up_to_the_policy() {
    let mut world = World::new();
    let kitchen = spawn(&mut world, "kitchen", Kind::Room);
    let glass = spawn_in(&mut world, kitchen, "glass", Kind::vessel());
    let jug = spawn_in(&mut world, kitchen, "jug", Kind::vessel());
    let juice = spawn_in(&mut world, glass, "juice", Kind::liquid("juice"));
    let water = spawn_in(&mut world, jug, "water", Kind::liquid("water"));

    assert_eq!(world.fill(water, glass).unwrap(), FillOutcome::Rejected);
    assert_eq!(
        world.fill_with(water, glass, &Dilute).unwrap(),
        FillOutcome::Mixed(juice)
    );
    assert_eq!(world.contains_liquid(glass), Some(juice));
    assert_eq!(world.contains_liquid(jug), Some(water));
    world.verify().unwrap();
}
