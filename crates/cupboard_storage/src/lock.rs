//! Lock/key coupling.
//!
//! A bound lock sits in its host's location and travels with it, but its
//! state is described as part of the host. Twin locks (the two sides of a
//! lockable door) mirror each other's state.

use cupboard_foundation::{EntityId, ErrorKind, Result};

use crate::kind::Kind;
use crate::trace::TraceEvent;
use crate::world::World;

impl World {
    /// Binds a lock to a lidded container or a door.
    ///
    /// The lock learns the host's adjectives and head noun as adjectives, and
    /// is placed in the host's location.
    ///
    /// # Errors
    ///
    /// Returns `NotALock`, `CannotTakeLock`, `LockAlreadyBound` or
    /// `HostAlreadyLocked`. Each is also recorded as a diagnostic.
    pub fn bind_lock(&mut self, host: EntityId, lock: EntityId) -> Result<()> {
        let host_record = self.entity(host)?;
        let lock_record = self.entity(lock)?;
        if !matches!(lock_record.kind, Kind::Lock { .. }) {
            return Err(self.reject("bind_lock", ErrorKind::NotALock(lock), &[lock]));
        }
        if !host_record.kind.can_take_lock() {
            return Err(self.reject("bind_lock", ErrorKind::CannotTakeLock(host), &[host]));
        }
        if host_record.lock_obj == Some(lock) {
            return Ok(());
        }
        if let Some(bound) = lock_record.parent_obj {
            return Err(self.reject(
                "bind_lock",
                ErrorKind::LockAlreadyBound { lock, host: bound },
                &[lock, host],
            ));
        }
        if let Some(existing) = host_record.lock_obj {
            return Err(self.reject(
                "bind_lock",
                ErrorKind::HostAlreadyLocked {
                    host,
                    lock: existing,
                },
                &[host, lock],
            ));
        }

        let mut inherited = host_record.adjectives.clone();
        let host_name = host_record.noun.name.clone();
        let host_location = host_record.location;
        inherited.push(self.interner.intern_word(&host_name));

        self.entity_mut(host)?.lock_obj = Some(lock);
        let lock_record = self.entity_mut(lock)?;
        lock_record.parent_obj = Some(host);
        for word in inherited {
            if !lock_record.adjectives.contains(&word) {
                lock_record.adjectives.push(word);
            }
        }
        let lock_location = lock_record.location;

        if lock_location != host_location {
            if let Some(location) = lock_location {
                self.unplace(location, lock);
            }
            if let Some(location) = host_location {
                self.place(location, lock);
            }
        }
        self.refresh(lock);
        self.refresh(host);
        self.trace(|world| {
            Some(TraceEvent::LockBound {
                lock: world.subject(lock)?,
                host: world.subject(host)?,
            })
        });
        self.check("bind_lock");
        Ok(())
    }

    /// Locks or unlocks, mirroring onto a twin lock.
    ///
    /// Returns false, changing nothing, if the lock is already in that state
    /// or the entity is not a lock.
    pub fn set_locked(&mut self, lock: EntityId, locked: bool) -> bool {
        let changed = self.apply_locked(lock, locked);
        self.check("set_locked");
        changed
    }

    fn apply_locked(&mut self, lock: EntityId, locked: bool) -> bool {
        let Some(record) = self.entities.get_mut(lock) else {
            return false;
        };
        match &mut record.kind {
            Kind::Lock { is_locked, .. } if *is_locked != locked => *is_locked = locked,
            _ => return false,
        }
        let host = record.parent_obj;
        let twin = record.twin;

        self.refresh(lock);
        if let Some(host) = host {
            self.refresh(host);
        }
        self.trace(|world| {
            Some(TraceEvent::LockChanged {
                lock: world.subject(lock)?,
                locked,
            })
        });
        if let Some(twin) = twin {
            // The state check on entry stops the mirror from bouncing back
            self.apply_locked(twin, locked);
        }
        true
    }

    /// Whether a lock is locked. `None` for anything but a lock.
    #[must_use]
    pub fn is_locked(&self, lock: EntityId) -> Option<bool> {
        match self.entities.get(lock)?.kind {
            Kind::Lock { is_locked, .. } => Some(is_locked),
            _ => None,
        }
    }

    /// Pairs two locks as twins and brings the second to the first's state.
    ///
    /// # Errors
    ///
    /// Returns `NotALock` if either entity is not a lock.
    pub fn pair_locks(&mut self, first: EntityId, second: EntityId) -> Result<()> {
        let mut state = None;
        for id in [first, second] {
            match self.entity(id)?.kind {
                Kind::Lock { is_locked, .. } => {
                    state.get_or_insert(is_locked);
                }
                _ => return Err(self.reject("pair_locks", ErrorKind::NotALock(id), &[id])),
            }
        }
        for (side, twin) in [(first, second), (second, first)] {
            let old = self.entity_mut(side)?.twin.replace(twin);
            if let Some(old) = old.filter(|old| *old != twin) {
                if let Some(record) = self.entities.get_mut(old) {
                    record.twin = None;
                }
            }
        }
        if let Some(locked) = state {
            self.apply_locked(second, locked);
        }
        self.check("pair_locks");
        Ok(())
    }

    /// Sets the key that operates a lock.
    ///
    /// # Errors
    ///
    /// Returns `NotALock` if the entity is not a lock, or a handle error if
    /// the key is stale.
    pub fn set_lock_key(&mut self, lock: EntityId, key: EntityId) -> Result<()> {
        self.entities.validate(key)?;
        if let Kind::Lock { key: slot, .. } = &mut self.entity_mut(lock)?.kind {
            *slot = Some(key);
            return Ok(());
        }
        Err(self.reject("set_lock_key", ErrorKind::NotALock(lock), &[lock]))
    }

    /// Whether `key` operates `lock`. Indistinguishable copies of the right
    /// key work too.
    #[must_use]
    pub fn lock_accepts(&self, lock: EntityId, key: EntityId) -> bool {
        let Some(Kind::Lock {
            key: Some(expected),
            ..
        }) = self.entities.get(lock).map(|record| &record.kind)
        else {
            return false;
        };
        match (self.entities.get(*expected), self.entities.get(key)) {
            (Some(expected), Some(offered)) => expected.ix == offered.ix,
            _ => false,
        }
    }
}
