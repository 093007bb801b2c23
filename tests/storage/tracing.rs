//! Integration tests for containment tracing

use cupboard_storage::{Kind, TraceEvent, TracerConfig, World, WorldConfig};

use crate::common::{spawn, spawn_in};

fn traced() -> World {
    World::with_config(WorldConfig::new().with_tracer(TracerConfig::new().enabled()))
}

// =============================================================================
// Recording
// =============================================================================

#[test]
fn tracing_is_off_by_default() {
    let mut world = World::new();
    let room = spawn(&mut world, "room", Kind::Room);
    spawn_in(&mut world, room, "coin", Kind::Thing);
    assert!(!world.tracer().is_enabled());
    assert!(world.tracer().buffer().is_empty());
}

#[test]
fn placements_are_recorded_with_subjects() {
    let mut world = traced();
    let room = spawn(&mut world, "room", Kind::Room);
    let coin = spawn_in(&mut world, room, "coin", Kind::Thing);

    let placed = world.tracer().buffer().of_type("placed");
    assert_eq!(placed.len(), 1);
    match &placed[0].event {
        TraceEvent::Placed { entity, container } => {
            assert_eq!(entity.id, coin);
            assert_eq!(container.id, room);
            assert_eq!(world.interner().ix_name(entity.ix), Some("coin"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn missed_removal_is_recorded() {
    let mut world = traced();
    let room = spawn(&mut world, "room", Kind::Room);
    let coin = spawn(&mut world, "coin", Kind::Thing);
    assert!(!world.remove(room, coin));
    assert_eq!(world.tracer().buffer().of_type("remove_missed").len(), 1);
    assert!(world.tracer().buffer().of_type("removed").is_empty());
}

#[test]
fn concealment_counts_hidden_entities() {
    let mut world = traced();
    let room = spawn(&mut world, "room", Kind::Room);
    let chest = spawn_in(&mut world, room, "chest", Kind::lidded(true));
    spawn_in(&mut world, chest, "coin", Kind::Thing);
    spawn_in(&mut world, chest, "gem", Kind::Thing);

    world.close(chest);
    let last = world.tracer().buffer().last().unwrap();
    assert!(matches!(last.event, TraceEvent::Concealed { hidden: 2, .. }));
}

#[test]
fn records_carry_the_turn() {
    let mut world = traced();
    let room = spawn(&mut world, "room", Kind::Room);
    world.begin_turn(7);
    spawn_in(&mut world, room, "coin", Kind::Thing);
    assert_eq!(world.tracer().buffer().records_for_turn(7).len(), 1);
    assert!(world.tracer().buffer().records_for_turn(0).is_empty());
}

#[test]
fn filters_restrict_recorded_types() {
    let mut world = World::with_config(WorldConfig::new().with_tracer(
        TracerConfig::new()
            .enabled()
            .filter_events(vec!["lock_changed".to_string()]),
    ));
    let room = spawn(&mut world, "room", Kind::Room);
    spawn_in(&mut world, room, "coin", Kind::Thing);
    let padlock = spawn(&mut world, "padlock", Kind::lock(false));
    world.set_locked(padlock, true);
    assert_eq!(world.tracer().buffer().len(), 1);
}

// =============================================================================
// Diagnostics and Formatting
// =============================================================================

#[test]
fn rejected_operations_become_diagnostics() {
    let mut world = traced();
    let coin = spawn(&mut world, "coin", Kind::Thing);
    let pebble = spawn(&mut world, "pebble", Kind::Thing);
    assert!(world.add(coin, pebble).is_err());

    let diagnostics = world.tracer().buffer().of_type("diagnostic");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0].event,
        TraceEvent::Diagnostic {
            operation: "add",
            ..
        }
    ));
}

#[test]
fn records_format_by_identifier() {
    let mut world = traced();
    let bowl = spawn(&mut world, "bowl", Kind::container());
    let coin = spawn_in(&mut world, bowl, "coin", Kind::Thing);
    let record = world.tracer().buffer().last().unwrap();
    let line = world.tracer().format_record(record, world.interner());
    assert!(line.starts_with("T0000"));
    assert!(line.ends_with(&format!("placed coin{coin} in bowl{bowl}")));
}
