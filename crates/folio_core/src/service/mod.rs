//! Core use-case services.
//!
//! # Responsibility
//! - Own the content aggregate and its mutation rules (`content_store`).
//! - Surface operation outcomes as expiring notifications
//!   (`notification_queue`).
//! - Gate the admin surface and validate image input at the edit boundary.

pub mod content_store;
pub mod image_intake;
pub mod notification_queue;
pub mod session;
