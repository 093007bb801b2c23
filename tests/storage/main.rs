//! Integration tests for Layer 1: Storage
//!
//! Tests for the world context, containment indexes, descriptions, locks,
//! doors, composites, tracing, and index properties.

mod common;
mod composite;
mod locks;
mod tracing;
mod visibility;
mod world;
