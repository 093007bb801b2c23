//! The visibility composer.
//!
//! Cached description strings are rebuilt eagerly whenever containment or
//! state changes, because the output layer reads them directly.

use cupboard_foundation::{EntityId, Ix, Result, join_list};

use crate::entity::Entity;
use crate::kind::Kind;
use crate::world::World;

impl World {
    /// Sets the base short description and recomposes.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or unknown.
    pub fn describe(&mut self, id: EntityId, text: impl Into<String>) -> Result<()> {
        self.entity_mut(id)?.text.base_desc = text.into();
        self.refresh(id);
        Ok(())
    }

    /// Sets the base examine description and recomposes.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or unknown.
    pub fn xdescribe(&mut self, id: EntityId, text: impl Into<String>) -> Result<()> {
        self.entity_mut(id)?.text.base_xdesc = text.into();
        self.refresh(id);
        Ok(())
    }

    /// Chooses whether the contents sentence is part of the short and the
    /// examine description.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or unknown.
    pub fn set_reveal(&mut self, id: EntityId, in_desc: bool, in_xdesc: bool) -> Result<()> {
        let text = &mut self.entity_mut(id)?.text;
        text.desc_reveal = in_desc;
        text.xdesc_reveal = in_xdesc;
        self.refresh(id);
        Ok(())
    }

    /// Composed short description.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or unknown.
    pub fn desc(&self, id: EntityId) -> Result<&str> {
        Ok(&self.entity(id)?.text.desc)
    }

    /// Composed examine description.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or unknown.
    pub fn xdesc(&self, id: EntityId) -> Result<&str> {
        Ok(&self.entity(id)?.text.xdesc)
    }

    /// Composed contents sentence.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or unknown.
    pub fn contents_desc(&self, id: EntityId) -> Result<&str> {
        Ok(&self.entity(id)?.text.contents_desc)
    }

    /// Recomposes an entity's cached text, then its composite parent's.
    pub(crate) fn refresh(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        let lists_contents = matches!(
            entity.kind,
            Kind::Surface | Kind::Container { .. } | Kind::UnderSpace { .. }
        );
        let (contents, learned) = if lists_contents {
            self.compose_contents(entity)
        } else {
            (String::new(), Vec::new())
        };
        let state = entity.kind.state_text();
        let lock = self.lock_text(entity);
        let composite = self.composite_text(entity);

        let text = &entity.text;
        let mut desc = format!("{}{state}{composite}", text.base_desc);
        let mut xdesc = format!("{}{state}{lock}{composite}", text.base_xdesc);
        if text.desc_reveal {
            desc.push_str(&contents);
        }
        if text.xdesc_reveal {
            xdesc.push_str(&contents);
        }
        let parent = entity
            .parent_obj
            .filter(|parent| self.entities.get(*parent).is_some_and(|p| p.children().contains(&id)));

        if let Some(entity) = self.entities.get_mut(id) {
            entity.text.desc = desc;
            entity.text.xdesc = xdesc;
            entity.text.contents_desc = contents;
        }
        if self.config.track_knowledge {
            for ix in learned {
                self.known.learn(ix);
            }
        }
        if let Some(parent) = parent {
            self.refresh(parent);
        }
    }

    /// Lock sentence for a container or door carrying a lock.
    fn lock_text(&self, entity: &Entity) -> &'static str {
        match entity
            .lock_obj
            .and_then(|lock| self.entities.get(lock))
            .map(|lock| &lock.kind)
        {
            Some(Kind::Lock {
                is_locked: true, ..
            }) => " It is locked. ",
            Some(Kind::Lock {
                is_locked: false, ..
            }) => " It is unlocked. ",
            _ => "",
        }
    }

    /// Merged child description, or the children's own in attachment order.
    /// Under-spaces describe themselves separately.
    fn composite_text(&self, entity: &Entity) -> String {
        let Some(composite) = &entity.composite else {
            return String::new();
        };
        if let Some(merged) = &composite.children_desc {
            return merged.clone();
        }
        composite
            .children
            .iter()
            .filter_map(|child| self.entities.get(*child))
            .filter(|child| !matches!(child.kind, Kind::UnderSpace { .. }))
            .map(|child| child.text.desc.as_str())
            .collect()
    }

    /// Contents sentence and the identifiers it mentions.
    fn compose_contents(&self, entity: &Entity) -> (String, Vec<Ix>) {
        let name = &entity.noun.name;
        match entity.kind {
            Kind::Container {
                lid: Some(false), ..
            } => {
                return (
                    format!("You cannot see inside the {name} as it is closed."),
                    Vec::new(),
                );
            }
            Kind::UnderSpace { revealed: false } => return (String::new(), Vec::new()),
            _ => {}
        }
        let Some(holdings) = &entity.holdings else {
            return (String::new(), Vec::new());
        };

        let mut items = Vec::new();
        let mut learned = Vec::new();
        let mut listed = 0;
        let mut player_here = false;
        for (ix, group) in holdings.contains.groups() {
            let mut eligible = Vec::new();
            for member in group {
                let Some(record) = self.entities.get(*member) else {
                    continue;
                };
                if record.kind.is_player() {
                    player_here = true;
                } else if record.parent_obj.is_none() {
                    eligible.push(record);
                }
            }
            match eligible.as_slice() {
                [] => continue,
                [only] => items.push(only.noun.with_article(false)),
                [first, ..] => items.push(format!("{} {}", eligible.len(), first.noun.plural())),
            }
            listed += eligible.len();
            learned.push(ix);
        }

        let preposition = entity.kind.preposition();
        let mut text = String::new();
        if !items.is_empty() {
            let verb = if listed == 1 { "is" } else { "are" };
            text = format!(
                " {} the {name} {verb} {}.",
                capitalize(preposition),
                join_list(&items)
            );
        }
        if player_here {
            if text.is_empty() {
                text.push(' ');
            } else {
                text.push_str(&self.config.clause_separator);
            }
            text.push_str(&format!("You are {preposition} the {name}."));
        }
        (text, learned)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
