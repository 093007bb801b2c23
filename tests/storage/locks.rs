//! Integration tests for locks and two-sided doors

use cupboard_foundation::ErrorKind;
use cupboard_storage::{Kind, World};

use crate::common::{spawn, spawn_in};

// =============================================================================
// Locks
// =============================================================================

#[test]
fn bound_lock_travels_with_host() {
    let mut world = World::new();
    let cellar = spawn(&mut world, "cellar", Kind::Room);
    let attic = spawn(&mut world, "attic", Kind::Room);
    let trunk = spawn_in(&mut world, cellar, "trunk", Kind::lidded(false));
    let padlock = spawn(&mut world, "padlock", Kind::lock(true));
    world.bind_lock(trunk, padlock).unwrap();
    assert_eq!(world.location(padlock), Some(cellar));

    world.relocate(trunk, attic).unwrap();
    assert_eq!(world.location(padlock), Some(attic));
    assert!(world.contents(cellar).unwrap().is_empty());

    assert!(world.remove(attic, trunk));
    assert_eq!(world.location(padlock), None);
    world.verify().unwrap();
}

#[test]
fn bound_lock_cannot_leave_alone() {
    let mut world = World::new();
    let cellar = spawn(&mut world, "cellar", Kind::Room);
    let attic = spawn(&mut world, "attic", Kind::Room);
    let trunk = spawn_in(&mut world, cellar, "trunk", Kind::lidded(false));
    let padlock = spawn(&mut world, "padlock", Kind::lock(true));
    world.bind_lock(trunk, padlock).unwrap();

    let err = world.relocate(padlock, attic).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TravelsWithHost { .. }));
    assert!(err.is_configuration());
    assert!(!world.remove(cellar, padlock));
    assert_eq!(world.location(padlock), Some(cellar));
    world.verify().unwrap();
}

#[test]
fn host_text_follows_lock_state() {
    let mut world = World::new();
    let trunk = spawn(&mut world, "trunk", Kind::lidded(false));
    let padlock = spawn(&mut world, "padlock", Kind::lock(true));
    world.bind_lock(trunk, padlock).unwrap();
    assert!(world.xdesc(trunk).unwrap().contains(" It is locked. "));

    assert!(world.set_locked(padlock, false));
    assert!(world.xdesc(trunk).unwrap().contains(" It is unlocked. "));
    assert!(!world.desc(trunk).unwrap().contains("unlocked"));
    assert_eq!(
        world.xdesc(padlock).unwrap(),
        "You notice nothing remarkable about the lock.  It is currently unlocked. "
    );
}

#[test]
fn set_locked_reports_change_only() {
    let mut world = World::new();
    let padlock = spawn(&mut world, "padlock", Kind::lock(false));
    assert!(!world.set_locked(padlock, false));
    assert!(world.set_locked(padlock, true));
    assert!(!world.set_locked(padlock, true));

    let rock = spawn(&mut world, "rock", Kind::Thing);
    assert!(!world.set_locked(rock, true));
    assert_eq!(world.is_locked(rock), None);
}

#[test]
fn lock_key_must_be_live() {
    let mut world = World::new();
    let padlock = spawn(&mut world, "padlock", Kind::lock(true));
    let key = spawn(&mut world, "key", Kind::Key);
    world.destroy(key).unwrap();
    let err = world.set_lock_key(padlock, key).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(_)));

    let rock = spawn(&mut world, "rock", Kind::Thing);
    let key = spawn(&mut world, "key", Kind::Key);
    let err = world.set_lock_key(rock, key).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotALock(_)));
}

#[test]
fn bound_lock_cannot_be_destroyed() {
    let mut world = World::new();
    let trunk = spawn(&mut world, "trunk", Kind::lidded(false));
    let padlock = spawn(&mut world, "padlock", Kind::lock(true));
    world.bind_lock(trunk, padlock).unwrap();
    let err = world.destroy(padlock).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StillPlaced(_)));
    let err = world.destroy(trunk).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StillPlaced(_)));
}

// =============================================================================
// Doors
// =============================================================================

#[test]
fn door_sides_mirror() {
    let mut world = World::new();
    let hall = spawn(&mut world, "hall", Kind::Room);
    let study = spawn(&mut world, "study", Kind::Room);
    let outer = spawn_in(&mut world, hall, "study_door", Kind::door());
    let inner = spawn_in(&mut world, study, "hall_door", Kind::door());
    world.pair_doors(outer, inner).unwrap();

    assert!(world.open(inner));
    assert_eq!(world.is_open(outer), Some(true));
    assert!(world.desc(outer).unwrap().contains(" It is currently open. "));
    assert!(world.close(outer));
    assert_eq!(world.is_open(inner), Some(false));
    world.verify().unwrap();
}

#[test]
fn locked_door_twins() {
    let mut world = World::new();
    let outer = spawn(&mut world, "front_door", Kind::door());
    let inner = spawn(&mut world, "back_door", Kind::door());
    let outer_lock = spawn(&mut world, "front_lock", Kind::lock(true));
    let inner_lock = spawn(&mut world, "back_lock", Kind::lock(true));
    world.pair_doors(outer, inner).unwrap();
    world.bind_lock(outer, outer_lock).unwrap();
    world.bind_lock(inner, inner_lock).unwrap();
    world.pair_locks(outer_lock, inner_lock).unwrap();

    assert!(world.set_locked(inner_lock, false));
    assert_eq!(world.is_locked(outer_lock), Some(false));
    assert!(world.xdesc(outer).unwrap().contains(" It is unlocked. "));
    assert!(world.xdesc(inner).unwrap().contains(" It is unlocked. "));

    // Lock state does not gate opening at this layer
    assert!(world.set_locked(outer_lock, true));
    assert!(world.open(outer));
    world.verify().unwrap();
}

#[test]
fn pairing_rejects_mismatched_kinds() {
    let mut world = World::new();
    let door = spawn(&mut world, "door", Kind::door());
    let padlock = spawn(&mut world, "padlock", Kind::lock(false));
    let err = world.pair_locks(padlock, door).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotALock(_)));
    let err = world.pair_doors(padlock, door).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotADoor(_)));
}
