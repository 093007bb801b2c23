//! The world context.
//!
//! The `World` owns every entity record and the interner, and is passed
//! explicitly to every containment operation. It uses persistent data
//! structures, so cloning a world for a speculative attempt is cheap.

use cupboard_foundation::{
    EntityId, Error, ErrorContext, ErrorKind, Interner, Ix, Result, WordId,
};

use crate::config::WorldConfig;
use crate::contents::{Contents, Holdings};
use crate::entity::{Blueprint, Descriptions, Entity, EntityStore};
use crate::kind::Kind;
use crate::knowledge::KnownEntities;
use crate::trace::{Subject, TraceEvent, Tracer};

#[cfg(feature = "serde")]
mod serde_support {
    use super::World;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for World {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            // Configuration and trace history are not part of a snapshot
            let mut state = serializer.serialize_struct("World", 4)?;
            state.serialize_field("entities", &self.entities)?;
            state.serialize_field("interner", &self.interner)?;
            state.serialize_field("known", &self.known)?;
            state.serialize_field("turn", &self.turn)?;
            state.end()
        }
    }

    impl<'de> Deserialize<'de> for World {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            #[serde(field_identifier, rename_all = "lowercase")]
            enum Field {
                Entities,
                Interner,
                Known,
                Turn,
            }

            struct WorldVisitor;

            impl<'de> Visitor<'de> for WorldVisitor {
                type Value = World;

                fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str("struct World")
                }

                fn visit_map<V>(self, mut map: V) -> std::result::Result<World, V::Error>
                where
                    V: MapAccess<'de>,
                {
                    let mut entities = None;
                    let mut interner = None;
                    let mut known = None;
                    let mut turn = None;

                    while let Some(key) = map.next_key()? {
                        match key {
                            Field::Entities => {
                                if entities.is_some() {
                                    return Err(de::Error::duplicate_field("entities"));
                                }
                                entities = Some(map.next_value()?);
                            }
                            Field::Interner => {
                                if interner.is_some() {
                                    return Err(de::Error::duplicate_field("interner"));
                                }
                                interner = Some(map.next_value()?);
                            }
                            Field::Known => {
                                if known.is_some() {
                                    return Err(de::Error::duplicate_field("known"));
                                }
                                known = Some(map.next_value()?);
                            }
                            Field::Turn => {
                                if turn.is_some() {
                                    return Err(de::Error::duplicate_field("turn"));
                                }
                                turn = Some(map.next_value()?);
                            }
                        }
                    }

                    let entities = entities.ok_or_else(|| de::Error::missing_field("entities"))?;
                    let interner = interner.ok_or_else(|| de::Error::missing_field("interner"))?;
                    let known = known.ok_or_else(|| de::Error::missing_field("known"))?;
                    let turn = turn.ok_or_else(|| de::Error::missing_field("turn"))?;

                    let mut world = World::new();
                    world.entities = entities;
                    world.interner = interner;
                    world.known = known;
                    world.turn = turn;
                    world.tracer.set_turn(turn);
                    Ok(world)
                }
            }

            const FIELDS: &[&str] = &["entities", "interner", "known", "turn"];
            deserializer.deserialize_struct("World", FIELDS, WorldVisitor)
        }
    }
}

/// The object graph and everything needed to mutate it.
///
/// Clone is cheap due to structural sharing in the entity store.
#[derive(Clone, Debug)]
pub struct World {
    /// Entity records.
    pub(crate) entities: EntityStore,
    /// Stable identifiers and vocabulary.
    pub(crate) interner: Interner,
    /// Identifiers the player has seen described.
    pub(crate) known: KnownEntities,
    /// Active configuration.
    pub(crate) config: WorldConfig,
    /// Current turn, set by the turn loop.
    pub(crate) turn: u64,
    /// Containment trace.
    pub(crate) tracer: Tracer,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates an empty world with the given configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            entities: EntityStore::new(),
            interner: Interner::new(),
            known: KnownEntities::new(),
            tracer: Tracer::new(config.tracer.clone()),
            config,
            turn: 0,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the current turn.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Starts a new turn. Subsequent trace records carry this turn number.
    pub fn begin_turn(&mut self, turn: u64) {
        self.turn = turn;
        self.tracer.set_turn(turn);
    }

    /// Returns the tracer.
    #[must_use]
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns the tracer mutably.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// Returns the interner.
    #[must_use]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Returns the identifiers the player has seen described.
    #[must_use]
    pub fn known(&self) -> &KnownEntities {
        &self.known
    }

    /// Returns the knowledge registry mutably.
    pub fn known_mut(&mut self) -> &mut KnownEntities {
        &mut self.known
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether a handle refers to a live entity.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.entities.exists(id)
    }

    /// Iterates over every live entity handle.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|(id, _)| id)
    }

    /// Returns an entity record.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or unknown.
    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities.validate(id)?;
        self.entities
            .get(id)
            .ok_or_else(|| Error::entity_not_found(id))
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities.validate(id)?;
        self.entities
            .get_mut(id)
            .ok_or_else(|| Error::entity_not_found(id))
    }

    /// Looks up an interned stable identifier.
    #[must_use]
    pub fn ix(&self, name: &str) -> Option<Ix> {
        self.interner.lookup_ix(name)
    }

    /// Stable identifier name of an entity.
    #[must_use]
    pub fn ix_name(&self, id: EntityId) -> Option<&str> {
        let entity = self.entities.get(id)?;
        self.interner.ix_name(entity.ix)
    }

    /// Interned adjective or synonym.
    #[must_use]
    pub fn word(&self, word: &str) -> Option<WordId> {
        self.interner.lookup_word(word)
    }

    /// Every live instance carrying a stable identifier.
    #[must_use]
    pub fn instances(&self, ix: Ix) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.ix == ix)
            .map(|(id, _)| id)
            .collect()
    }

    /// Direct parent of an entity.
    #[must_use]
    pub fn location(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(id).and_then(|entity| entity.location)
    }

    /// Direct contents of a holder.
    ///
    /// # Errors
    ///
    /// Returns `NotAHolder` if the entity has no contents.
    pub fn contents(&self, id: EntityId) -> Result<&Contents> {
        Ok(&self.holdings(id)?.contains)
    }

    /// Everything beneath a holder that is visible from it.
    ///
    /// # Errors
    ///
    /// Returns `NotAHolder` if the entity has no contents.
    pub fn sub_contents(&self, id: EntityId) -> Result<&Contents> {
        Ok(&self.holdings(id)?.sub_contains)
    }

    pub(crate) fn holdings(&self, id: EntityId) -> Result<&Holdings> {
        self.entity(id)?
            .holdings
            .as_ref()
            .ok_or_else(|| Error::not_a_holder(id))
    }

    /// Spawns an unplaced entity from a blueprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the blueprint names a key or transfer template
    /// that is not a live entity.
    pub fn spawn(&mut self, blueprint: Blueprint) -> Result<EntityId> {
        let Blueprint {
            ix,
            noun,
            kind,
            adjectives,
            synonyms,
            size,
            desc,
            xdesc,
            inv_item,
        } = blueprint;

        let referenced = match &kind {
            Kind::Lock { key, .. } => *key,
            Kind::Liquid(state) => state.transfer,
            _ => None,
        };
        if let Some(other) = referenced {
            self.entities.validate(other)?;
        }

        let is_holder = kind.is_holder();
        let reveals = matches!(
            kind,
            Kind::Surface | Kind::Container { .. } | Kind::UnderSpace { .. }
        );
        let (base_desc, base_xdesc) = if matches!(kind, Kind::Lock { .. }) {
            (
                desc.unwrap_or_default(),
                xdesc.unwrap_or_else(|| "You notice nothing remarkable about the lock. ".to_string()),
            )
        } else {
            let desc = desc.unwrap_or_else(|| format!("There is {} here. ", noun.with_article(false)));
            let xdesc = xdesc.unwrap_or_else(|| desc.clone());
            (desc, xdesc)
        };
        let default_inv = matches!(
            kind,
            Kind::Thing
                | Kind::Key
                | Kind::Container { .. }
                | Kind::Liquid(_)
                | Kind::LightSource { .. }
        );

        let entity = Entity {
            ix: self.interner.intern_ix(&ix),
            adjectives: adjectives
                .iter()
                .map(|word| self.interner.intern_word(word))
                .collect(),
            synonyms: synonyms
                .iter()
                .map(|word| self.interner.intern_word(word))
                .collect(),
            noun,
            size: size.unwrap_or(if is_holder {
                self.config.holder_size
            } else {
                self.config.thing_size
            }),
            holdings: is_holder.then(Holdings::default),
            inv_item: inv_item.unwrap_or(default_inv),
            kind,
            location: None,
            parent_obj: None,
            lock_obj: None,
            twin: None,
            composite: None,
            text: Descriptions {
                base_desc,
                base_xdesc,
                desc_reveal: reveals,
                xdesc_reveal: reveals,
                ..Descriptions::default()
            },
        };
        let id = self.entities.insert(entity);
        self.refresh(id);
        Ok(id)
    }

    /// Spawns an unplaced, indistinguishable copy of an entity.
    ///
    /// The copy shares the stable identifier, naming, kind and base text.
    /// It has no location, no links to locks, twins or children, and empty
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or unknown.
    pub fn copy_entity(&mut self, id: EntityId) -> Result<EntityId> {
        let original = self.entity(id)?;
        let mut copy = original.clone();
        copy.location = None;
        copy.parent_obj = None;
        copy.lock_obj = None;
        copy.twin = None;
        copy.composite = None;
        copy.holdings = copy.holdings.map(|_| Holdings::default());
        let copy_id = self.entities.insert(copy);
        self.refresh(copy_id);
        Ok(copy_id)
    }

    /// Discards an entity that is no longer indexed anywhere.
    ///
    /// A twin's back reference is cleared.
    ///
    /// # Errors
    ///
    /// Returns `StillPlaced` if the entity has a location, holds anything,
    /// is bound to a host or carries a lock or attached children.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        let entity = self.entity(id)?;
        let holds_anything = entity
            .holdings
            .as_ref()
            .is_some_and(|holdings| !holdings.contains.is_empty());
        if entity.location.is_some()
            || holds_anything
            || entity.parent_obj.is_some()
            || entity.lock_obj.is_some()
            || !entity.children().is_empty()
        {
            return Err(Error::new(ErrorKind::StillPlaced(id))
                .with_context(ErrorContext::new().with_operation("destroy").with_entity(id)));
        }
        let subject = Subject { id, ix: entity.ix };
        let twin = entity.twin;

        self.entities.remove(id)?;
        if let Some(twin) = twin.and_then(|twin| self.entities.get_mut(twin)) {
            twin.twin = None;
        }
        self.trace(|_| Some(TraceEvent::Destroyed { entity: subject }));
        Ok(())
    }

    /// Trace subject for a live entity.
    pub(crate) fn subject(&self, id: EntityId) -> Option<Subject> {
        self.entities.get(id).map(|entity| Subject { id, ix: entity.ix })
    }

    /// Records a trace event built lazily, only when tracing is enabled.
    pub(crate) fn trace(&mut self, build: impl FnOnce(&Self) -> Option<TraceEvent>) {
        if !self.tracer.is_enabled() {
            return;
        }
        if let Some(event) = build(self) {
            self.tracer.record(event);
        }
    }

    /// Builds a world-building error and records it as a diagnostic.
    pub(crate) fn reject(
        &mut self,
        operation: &'static str,
        kind: ErrorKind,
        entities: &[EntityId],
    ) -> Error {
        let context = entities
            .iter()
            .fold(ErrorContext::new().with_operation(operation), |context, id| {
                context.with_entity(*id)
            });
        let error = Error::new(kind).with_context(context);
        let message = error.to_string();
        self.trace(|_| Some(TraceEvent::Diagnostic { operation, message }));
        error
    }

    /// Runs index verification after a public mutation, when configured.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when an index has drifted.
    pub(crate) fn check(&self, operation: &'static str) {
        if cfg!(debug_assertions) && self.config.verify_indexes {
            if let Err(error) = self.verify() {
                panic!("index drift after {operation}: {error}");
            }
        }
    }
}
