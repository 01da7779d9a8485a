//! Repository layer over durable storage.
//!
//! # Responsibility
//! - Define use-case oriented persistence contracts.
//! - Keep serialization and storage-key details out of the store.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   storage transport errors.

pub mod content_repo;
