//! Cupboard - Spatial containment engine for parser-driven interactive fiction
//!
//! This crate re-exports all layers of the Cupboard system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: cupboard_storage    - World context, containment indexes, descriptions,
//!                                locks, doors, composites, liquids, tracing
//! Layer 0: cupboard_foundation - Core types (EntityId, Ix, Noun, Error)
//! ```
//!
//! The parser, verb dispatch, turn loop and save files live outside this
//! engine. They call into [`storage::World`] and read the cached description
//! strings it composes.

pub use cupboard_foundation as foundation;
pub use cupboard_storage as storage;
