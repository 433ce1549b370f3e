//! Core value types shared across Tessera: fixed-size vectors and the
//! generational handles used to refer to domain entities.

/// Domain entity kinds, generational ids, and the in-memory entity store.
pub mod entity;
/// Three-component vectors.
pub mod vec3;

pub use entity::{EntityDirectory, EntityId, EntityKind, EntityRef, EntityStore, InvalidationSink};
pub use vec3::Vec3;
