//! World context, containment indexes, and visibility composition for
//! Cupboard.
//!
//! This crate provides:
//! - [`World`] - The explicit world context every operation takes
//! - [`EntityStore`] - Generational entity records
//! - [`Kind`] - The closed set of entity kinds and their capabilities
//! - [`Contents`] - Ordered identifier-to-instances indexes
//! - Containment maintenance (`add`, `remove`, `open`, `close`, `reveal`,
//!   `hide`) that keeps every ancestor's `sub_contains` in step
//! - Lock/key coupling, two-sided doors, composite attachment, light sources
//!   and liquid transfer built on top of it
//! - [`trace`] - A ring-buffer trace of containment activity

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod composite;
pub mod config;
pub mod containment;
pub mod contents;
pub mod describe;
pub mod door;
pub mod entity;
pub mod kind;
pub mod knowledge;
pub mod light;
pub mod liquid;
pub mod lock;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod trace;
pub mod verify;
pub mod world;

pub use config::WorldConfig;
pub use containment::MovedOut;
pub use contents::{Contents, Holdings};
pub use entity::{Blueprint, Composite, Descriptions, Entity, EntityStore};
pub use kind::{Kind, LiquidState};
pub use knowledge::KnownEntities;
pub use liquid::{FillOutcome, MixPolicy, RejectMixing};
#[cfg(feature = "serde")]
pub use snapshot::SnapshotError;
pub use trace::{TraceEvent, Tracer, TracerConfig};
pub use world::World;
