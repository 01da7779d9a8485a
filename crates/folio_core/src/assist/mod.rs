//! Text-generation assistant for admin copy editing.
//!
//! # Responsibility
//! - Define the `TextGenerator` contract used by the admin surface.
//! - Run generation off the caller's thread and hand the text to a callback.
//!
//! # Invariants
//! - Generators never fail upward: every failure becomes a readable string.
//! - The callback is the only way a result reaches caller state. Two calls in
//!   flight for the same field resolve in completion order; the later
//!   callback overwrites the earlier one.

use std::sync::Arc;
use std::thread::JoinHandle;

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiGenerator};

/// Task sent when the editor asks for help without naming one.
pub const DEFAULT_TASK: &str = "Rewrite, improve, or generate content for this section.";

/// Produces suggestion text for one task within a context.
pub trait TextGenerator {
    /// Returns suggested text or a human-readable fallback message.
    fn generate(&self, task: &str, context: &str) -> String;
}

/// Runs `generator` on a background thread and passes the text to `on_done`.
///
/// Dropping the handle detaches the task; the callback still fires.
pub fn spawn_generation<G, F>(
    generator: Arc<G>,
    task: impl Into<String>,
    context: impl Into<String>,
    on_done: F,
) -> JoinHandle<()>
where
    G: TextGenerator + Send + Sync + ?Sized + 'static,
    F: FnOnce(String) + Send + 'static,
{
    let task = task.into();
    let context = context.into();
    std::thread::spawn(move || {
        let text = generator.generate(&task, &context);
        on_done(text);
    })
}
