//! The closed set of entity kinds and the capabilities they declare.
//!
//! Containment logic dispatches on these capabilities instead of on ad hoc
//! type tests: whether an entity holds others, whether it conceals what it
//! holds, whether it can take a lock, and so on.

use cupboard_foundation::EntityId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-liquid transfer permissions and identity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LiquidState {
    /// What the liquid is ("water", "motor oil"); equal types merge.
    pub liquid_type: String,
    /// Whether the drink verb may consume it.
    pub can_drink: bool,
    /// Whether it may be dumped out of its vessel.
    pub can_pour_out: bool,
    /// Whether other vessels may be filled from it.
    pub can_fill_from: bool,
    /// Drawing from an infinite well spawns copies and never depletes it.
    pub infinite_well: bool,
    /// Template copied by an infinite well, when it is not the well itself.
    pub transfer: Option<EntityId>,
}

impl LiquidState {
    /// Creates a drinkable, pourable liquid of the given type.
    #[must_use]
    pub fn new(liquid_type: impl Into<String>) -> Self {
        Self {
            liquid_type: liquid_type.into(),
            can_drink: true,
            can_pour_out: true,
            can_fill_from: true,
            infinite_well: false,
            transfer: None,
        }
    }

    /// Builder method to make this liquid an infinite well.
    #[must_use]
    pub fn infinite(mut self) -> Self {
        self.infinite_well = true;
        self
    }
}

/// What an entity is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    /// An ordinary portable object.
    Thing,
    /// A key.
    Key,
    /// A top-level location.
    Room,
    /// Things are placed on it.
    Surface,
    /// Things are placed in it.
    Container {
        /// `None` for an open box with no lid; `Some(open)` otherwise.
        lid: Option<bool>,
        /// Whether it can hold a liquid.
        holds_liquid: bool,
    },
    /// Things are placed under it; hidden until looked under.
    UnderSpace {
        /// Whether the space has been looked under.
        revealed: bool,
    },
    /// The player or a non-player character. Its holdings are its inventory.
    Actor {
        /// Whether this is the player.
        player: bool,
    },
    /// One side of a door.
    Door {
        /// Mirrored onto the twin side.
        is_open: bool,
    },
    /// A detachable lock.
    Lock {
        /// Mirrored onto the twin lock.
        is_locked: bool,
        /// The key that operates it.
        key: Option<EntityId>,
    },
    /// A liquid.
    Liquid(LiquidState),
    /// A lamp, candle or torch.
    LightSource {
        /// Whether it is burning.
        is_lit: bool,
        /// Whether it burns down while lit.
        consumable: bool,
        /// Turns of light remaining; only counted when consumable.
        turns_left: u32,
    },
}

impl Kind {
    /// A lidless container.
    #[must_use]
    pub const fn container() -> Self {
        Self::Container {
            lid: None,
            holds_liquid: false,
        }
    }

    /// A container with a lid in the given state.
    #[must_use]
    pub const fn lidded(is_open: bool) -> Self {
        Self::Container {
            lid: Some(is_open),
            holds_liquid: false,
        }
    }

    /// A lidless container that can hold a liquid.
    #[must_use]
    pub const fn vessel() -> Self {
        Self::Container {
            lid: None,
            holds_liquid: true,
        }
    }

    /// An under-space that has not been looked under yet.
    #[must_use]
    pub const fn under_space() -> Self {
        Self::UnderSpace { revealed: false }
    }

    /// The player actor.
    #[must_use]
    pub const fn player() -> Self {
        Self::Actor { player: true }
    }

    /// A non-player character.
    #[must_use]
    pub const fn npc() -> Self {
        Self::Actor { player: false }
    }

    /// A closed door side.
    #[must_use]
    pub const fn door() -> Self {
        Self::Door { is_open: false }
    }

    /// A lock in the given state with no key yet.
    #[must_use]
    pub const fn lock(is_locked: bool) -> Self {
        Self::Lock {
            is_locked,
            key: None,
        }
    }

    /// A liquid of the given type.
    #[must_use]
    pub fn liquid(liquid_type: impl Into<String>) -> Self {
        Self::Liquid(LiquidState::new(liquid_type))
    }

    /// An unlit light that never burns out.
    #[must_use]
    pub const fn light_source() -> Self {
        Self::LightSource {
            is_lit: false,
            consumable: false,
            turns_left: 20,
        }
    }

    /// An unlit light that lasts for `turns_left` lit turns.
    #[must_use]
    pub const fn consumable_light(turns_left: u32) -> Self {
        Self::LightSource {
            is_lit: false,
            consumable: true,
            turns_left,
        }
    }

    /// Whether the entity has `contains`/`sub_contains` indexes.
    #[must_use]
    pub const fn is_holder(&self) -> bool {
        matches!(
            self,
            Self::Room
                | Self::Surface
                | Self::Container { .. }
                | Self::UnderSpace { .. }
                | Self::Actor { .. }
        )
    }

    /// Whether the entity currently hides what it holds from everything
    /// outside it: a closed lid or an unrevealed under-space.
    #[must_use]
    pub const fn conceals(&self) -> bool {
        matches!(
            self,
            Self::Container {
                lid: Some(false),
                ..
            } | Self::UnderSpace { revealed: false }
        )
    }

    /// Whether what this entity holds propagates into its ancestors' indexes.
    ///
    /// Actors never expose their inventory to ambient scope.
    #[must_use]
    pub const fn exposes_contents(&self) -> bool {
        self.is_holder() && !self.conceals() && !self.is_actor()
    }

    /// Whether a lock may be bound to this entity.
    #[must_use]
    pub const fn can_take_lock(&self) -> bool {
        matches!(self, Self::Container { lid: Some(_), .. } | Self::Door { .. })
    }

    /// Whether this is an actor.
    #[must_use]
    pub const fn is_actor(&self) -> bool {
        matches!(self, Self::Actor { .. })
    }

    /// Whether this is the player actor.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self, Self::Actor { player: true })
    }

    /// Whether this is a container that can hold a liquid.
    #[must_use]
    pub const fn is_vessel(&self) -> bool {
        matches!(
            self,
            Self::Container {
                holds_liquid: true,
                ..
            }
        )
    }

    /// Liquid state, when this is a liquid.
    #[must_use]
    pub const fn as_liquid(&self) -> Option<&LiquidState> {
        match self {
            Self::Liquid(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable liquid state, when this is a liquid.
    pub fn as_liquid_mut(&mut self) -> Option<&mut LiquidState> {
        match self {
            Self::Liquid(state) => Some(state),
            _ => None,
        }
    }

    /// Preposition for "the coin is ___ the box".
    #[must_use]
    pub const fn preposition(&self) -> &'static str {
        match self {
            Self::Surface => "on",
            Self::UnderSpace { .. } => "under",
            _ => "in",
        }
    }

    /// State sentence appended to the entity's descriptions, if any.
    #[must_use]
    pub const fn state_text(&self) -> &'static str {
        match self {
            Self::Container { lid: Some(true), .. } | Self::Door { is_open: true } => {
                " It is currently open. "
            }
            Self::Container {
                lid: Some(false), ..
            }
            | Self::Door { is_open: false } => " It is currently closed. ",
            Self::Lock {
                is_locked: true, ..
            } => " It is currently locked. ",
            Self::Lock {
                is_locked: false, ..
            } => " It is currently unlocked. ",
            Self::LightSource { is_lit: true, .. } => " It is currently lit. ",
            Self::LightSource {
                consumable: true,
                turns_left: 0,
                ..
            } => " It is burnt out. ",
            Self::LightSource { .. } => " It is currently not lit. ",
            _ => "",
        }
    }
}
