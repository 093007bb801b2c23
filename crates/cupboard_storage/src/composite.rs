//! Composite attachment.
//!
//! A composite owns sub-objects that always share its location: a bed with
//! the space under it, a desk with its drawer. The containment maintainer
//! moves them with the parent; this module only wires them up.

use cupboard_foundation::{EntityId, ErrorKind, Result};

use crate::entity::Composite;
use crate::trace::TraceEvent;
use crate::world::World;

impl World {
    /// Permanently attaches `child` to `parent`.
    ///
    /// The child stops being an inventory item and moves to the parent's
    /// location.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyAttached` if the child already belongs to a host, and
    /// `ContainmentCycle` if the child is the parent, holds it, or already
    /// carries it along.
    pub fn attach(&mut self, parent: EntityId, child: EntityId) -> Result<()> {
        self.entities.validate(parent)?;
        let record = self.entity(child)?;
        if let Some(host) = record.parent_obj {
            return Err(self.reject(
                "attach",
                ErrorKind::AlreadyAttached {
                    child,
                    parent: host,
                },
                &[child, parent],
            ));
        }
        if child == parent
            || self.is_within(parent, child)
            || self.travelling_with(child).contains(&parent)
        {
            return Err(self.reject(
                "attach",
                ErrorKind::ContainmentCycle {
                    entity: child,
                    container: parent,
                },
                &[child, parent],
            ));
        }

        let parent_record = self.entity_mut(parent)?;
        parent_record
            .composite
            .get_or_insert_with(Composite::default)
            .children
            .push(child);
        let parent_location = parent_record.location;

        let record = self.entity_mut(child)?;
        record.parent_obj = Some(parent);
        record.inv_item = false;
        let child_location = record.location;

        if child_location != parent_location {
            if let Some(location) = child_location {
                self.unplace(location, child);
            }
            if let Some(location) = parent_location {
                self.place(location, child);
            }
        }
        self.refresh(child);
        self.refresh(parent);
        self.trace(|world| {
            Some(TraceEvent::Attached {
                parent: world.subject(parent)?,
                child: world.subject(child)?,
            })
        });
        self.check("attach");
        Ok(())
    }

    /// Sets or clears the merged description used instead of the children's.
    ///
    /// # Errors
    ///
    /// Returns `NotComposite` if the entity has no attached sub-objects.
    pub fn set_children_desc(&mut self, parent: EntityId, text: Option<String>) -> Result<()> {
        let Some(composite) = self.entity_mut(parent)?.composite.as_mut() else {
            return Err(self.reject(
                "set_children_desc",
                ErrorKind::NotComposite(parent),
                &[parent],
            ));
        };
        composite.children_desc = text;
        self.refresh(parent);
        Ok(())
    }
}
