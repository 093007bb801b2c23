//! Invariant verification.
//!
//! Re-derives every index from ground truth and compares. Used by tests and,
//! when `verify_indexes` is on, after every public mutation in debug builds.

use std::collections::BTreeSet;

use cupboard_foundation::{EntityId, Error, Result};

use crate::contents::Contents;
use crate::kind::Kind;
use crate::world::World;

impl World {
    /// Checks every containment, lock, twin and liquid invariant.
    ///
    /// Only containers are held to one liquid. Rooms and surfaces collect
    /// whatever is spilled on them.
    ///
    /// # Errors
    ///
    /// Returns `IndexDrift` describing the first disagreement found.
    pub fn verify(&self) -> Result<()> {
        for (id, entity) in self.entities.iter() {
            self.verify_location(id)?;
            if let Some(holdings) = &entity.holdings {
                self.verify_contents(id, &holdings.contains, "contains")?;
                self.verify_contents(id, &holdings.sub_contains, "sub_contains")?;
                self.verify_sub(id, &holdings.sub_contains)?;
                if matches!(entity.kind, Kind::Container { .. }) {
                    self.verify_single_liquid(id, &holdings.contains)?;
                }
            }
            self.verify_links(id)?;
        }
        Ok(())
    }

    fn verify_location(&self, id: EntityId) -> Result<()> {
        let Some(location) = self.location(id) else {
            return Ok(());
        };
        let listed = self.entities.get(id).is_some_and(|entity| {
            self.holdings(location)
                .is_ok_and(|holdings| holdings.contains.contains(entity.ix, id))
        });
        if listed {
            Ok(())
        } else {
            Err(Error::index_drift(format!(
                "{id} names {location} as its location but is not in its contents"
            )))
        }
    }

    fn verify_contents(&self, holder: EntityId, contents: &Contents, index: &str) -> Result<()> {
        if contents.is_malformed() {
            return Err(Error::index_drift(format!(
                "{index} of {holder} has an empty or unordered key"
            )));
        }
        for (ix, group) in contents.groups() {
            for member in group {
                let Some(entity) = self.entities.get(*member) else {
                    return Err(Error::index_drift(format!(
                        "{index} of {holder} lists dead entity {member}"
                    )));
                };
                if entity.ix != ix {
                    return Err(Error::index_drift(format!(
                        "{index} of {holder} files {member} under the wrong identifier"
                    )));
                }
                if index == "contains" && entity.location != Some(holder) {
                    return Err(Error::index_drift(format!(
                        "{holder} lists {member}, which is located elsewhere"
                    )));
                }
            }
        }
        Ok(())
    }

    fn verify_sub(&self, holder: EntityId, actual: &Contents) -> Result<()> {
        let mut expected = BTreeSet::new();
        self.collect_visible(holder, &mut expected, self.entities.len());
        let actual: BTreeSet<EntityId> = actual.ids().collect();
        if expected == actual {
            return Ok(());
        }
        let missing: Vec<String> = expected.difference(&actual).map(ToString::to_string).collect();
        let extra: Vec<String> = actual.difference(&expected).map(ToString::to_string).collect();
        Err(Error::index_drift(format!(
            "sub_contains of {holder} is missing [{}] and has extra [{}]",
            missing.join(", "),
            extra.join(", ")
        )))
    }

    /// Everything beneath `holder` it can see, derived from `contains` alone.
    fn collect_visible(&self, holder: EntityId, out: &mut BTreeSet<EntityId>, budget: usize) {
        if budget == 0 {
            return;
        }
        let Ok(holdings) = self.holdings(holder) else {
            return;
        };
        for child in holdings.contains.ids() {
            if !out.insert(child) {
                continue;
            }
            if self
                .entities
                .get(child)
                .is_some_and(|entity| entity.kind.exposes_contents())
            {
                self.collect_visible(child, out, budget - 1);
            }
        }
    }

    fn verify_single_liquid(&self, holder: EntityId, contains: &Contents) -> Result<()> {
        let liquids = contains
            .ids()
            .filter(|id| {
                self.entities
                    .get(*id)
                    .is_some_and(|entity| matches!(entity.kind, Kind::Liquid(_)))
            })
            .count();
        if liquids > 1 {
            return Err(Error::index_drift(format!(
                "{holder} holds {liquids} liquids"
            )));
        }
        Ok(())
    }

    fn verify_links(&self, id: EntityId) -> Result<()> {
        let Some(entity) = self.entities.get(id) else {
            return Ok(());
        };

        if let Some(lock) = entity.lock_obj {
            let bound = self.entities.get(lock).is_some_and(|record| {
                matches!(record.kind, Kind::Lock { .. }) && record.parent_obj == Some(id)
            });
            if !bound {
                return Err(Error::index_drift(format!(
                    "{id} carries lock {lock}, which does not name it as its host"
                )));
            }
        }

        if let Some(parent) = entity.parent_obj {
            let Some(host) = self.entities.get(parent) else {
                return Err(Error::index_drift(format!("{id} names dead host {parent}")));
            };
            if host.lock_obj != Some(id) && !host.children().contains(&id) {
                return Err(Error::index_drift(format!(
                    "{id} names {parent} as its host, which does not claim it"
                )));
            }
            if host.location != entity.location {
                return Err(Error::index_drift(format!(
                    "{id} has been separated from its host {parent}"
                )));
            }
        }

        if let Some(twin) = entity.twin {
            let Some(other) = self.entities.get(twin) else {
                return Err(Error::index_drift(format!("{id} has dead twin {twin}")));
            };
            if other.twin != Some(id) {
                return Err(Error::index_drift(format!(
                    "{id} and {twin} disagree about being twins"
                )));
            }
            let mirrored = match (&entity.kind, &other.kind) {
                (Kind::Door { is_open: a }, Kind::Door { is_open: b }) => a == b,
                (Kind::Lock { is_locked: a, .. }, Kind::Lock { is_locked: b, .. }) => a == b,
                _ => false,
            };
            if !mirrored {
                return Err(Error::index_drift(format!(
                    "twins {id} and {twin} are out of step"
                )));
            }
        }
        Ok(())
    }
}
