//! Structural snapshots of a world.
//!
//! A snapshot carries the entity store, interner, knowledge registry and turn
//! number in MessagePack. Configuration and trace history are not included;
//! a restored world uses the configuration passed to [`World::from_bytes`].

use thiserror::Error;

use crate::config::WorldConfig;
use crate::trace::Tracer;
use crate::world::World;

/// Failure to write or read a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The world could not be encoded.
    #[error("failed to encode world snapshot: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    /// The bytes are not a world snapshot.
    #[error("failed to decode world snapshot: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

impl World {
    /// Encodes the world as a MessagePack snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    /// Restores a world from a snapshot, applying `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid snapshot.
    pub fn from_bytes(bytes: &[u8], config: WorldConfig) -> Result<Self, SnapshotError> {
        let mut world: World = rmp_serde::from_slice(bytes)?;
        let mut tracer = Tracer::new(config.tracer.clone());
        tracer.set_turn(world.turn);
        world.tracer = tracer;
        world.config = config;
        Ok(world)
    }
}
