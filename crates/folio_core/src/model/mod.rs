//! Portfolio content model.
//!
//! # Responsibility
//! - Define the persisted content aggregate and its records.
//! - Provide the fixed default dataset and the closed service icon set.
//! - Define transient notification records.
//!
//! # Invariants
//! - Every record is identified by an id unique within its collection.
//! - `AppData` is always fully populated; there is no partial aggregate.

pub mod content;
pub mod defaults;
pub mod icon;
pub mod notification;
