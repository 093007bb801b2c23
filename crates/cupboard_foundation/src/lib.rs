//! Identifiers, naming metadata, and error types for Cupboard.
//!
//! This crate provides:
//! - [`EntityId`] - Generational handles for placed object instances
//! - [`Ix`] / [`WordId`] - Interned stable identifiers and vocabulary words
//! - [`Interner`] - Mapping between identifier strings and compact ids
//! - [`Noun`] - Article and pluralization metadata, list formatting
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod intern;
pub mod noun;

pub use error::{Error, ErrorContext, ErrorKind};
pub use id::EntityId;
pub use intern::{Interner, Ix, WordId};
pub use noun::{Noun, join_list};

/// Result type used throughout Cupboard.
pub type Result<T> = std::result::Result<T, Error>;
