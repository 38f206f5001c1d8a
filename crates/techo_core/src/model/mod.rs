//! Domain model for user-created calendar events.
//!
//! # Responsibility
//! - Define the persisted event record and the ordered collection of them.
//!
//! # Invariants
//! - Events have no identifier; identity is the position in the collection.
//! - The collection is append-only: never reordered, deduplicated or edited.

pub mod event;
