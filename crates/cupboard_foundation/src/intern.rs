//! Interning for stable identifiers and vocabulary words.
//!
//! Stable identifiers name a *kind* of object ("brass_key", "water") and are
//! shared by indistinguishable copies. Words are the adjectives and synonyms
//! the parser collaborator matches against.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interned stable identifier.
///
/// Assigned at world-construction time; the persistence collaborator keys
/// saved state by the string behind it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ix(pub(crate) u32);

impl Ix {
    /// Returns the raw index of this identifier.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Ix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ix({})", self.0)
    }
}

/// Interned vocabulary word (adjective or synonym).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordId(pub(crate) u32);

impl WordId {
    /// Returns the raw index of this word.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordId({})", self.0)
    }
}

/// Interner for identifiers and words.
///
/// Identifiers and words live in separate namespaces, so the word "lock" and
/// the identifier "lock" intern to unrelated ids.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interner {
    idents: Vec<Arc<str>>,
    ident_map: HashMap<Arc<str>, Ix>,
    words: Vec<Arc<str>>,
    word_map: HashMap<Arc<str>, WordId>,
}

impl Interner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a stable identifier.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` identifiers are interned.
    pub fn intern_ix(&mut self, s: &str) -> Ix {
        if let Some(&ix) = self.ident_map.get(s) {
            return ix;
        }
        let ix = Ix(u32::try_from(self.idents.len()).expect("too many identifiers"));
        let arc: Arc<str> = s.into();
        self.idents.push(arc.clone());
        self.ident_map.insert(arc, ix);
        ix
    }

    /// Looks up an identifier without interning it.
    #[must_use]
    pub fn lookup_ix(&self, s: &str) -> Option<Ix> {
        self.ident_map.get(s).copied()
    }

    /// Returns the string behind an identifier.
    #[must_use]
    pub fn ix_name(&self, ix: Ix) -> Option<&str> {
        self.idents.get(ix.0 as usize).map(AsRef::as_ref)
    }

    /// Interns a vocabulary word. Words are stored lowercased.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` words are interned.
    pub fn intern_word(&mut self, s: &str) -> WordId {
        let lowered = s.to_lowercase();
        if let Some(&id) = self.word_map.get(lowered.as_str()) {
            return id;
        }
        let id = WordId(u32::try_from(self.words.len()).expect("too many words"));
        let arc: Arc<str> = lowered.into();
        self.words.push(arc.clone());
        self.word_map.insert(arc, id);
        id
    }

    /// Looks up a word without interning it.
    #[must_use]
    pub fn lookup_word(&self, s: &str) -> Option<WordId> {
        self.word_map.get(s.to_lowercase().as_str()).copied()
    }

    /// Returns the string behind a word.
    #[must_use]
    pub fn word(&self, id: WordId) -> Option<&str> {
        self.words.get(id.0 as usize).map(AsRef::as_ref)
    }

    /// Number of interned identifiers.
    #[must_use]
    pub fn ix_count(&self) -> usize {
        self.idents.len()
    }

    /// Number of interned words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}
