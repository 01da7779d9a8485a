//! Ephemeral notification queue.
//!
//! # Responsibility
//! - Hold transient outcome messages in arrival order.
//! - Expire every entry independently after `NOTIFICATION_TTL_MS`.
//!
//! # Invariants
//! - Ids are never reused within one queue instance.
//! - Expiry is evaluated against the caller-supplied time; one entry's window
//!   never depends on another entry's enqueue, dismissal or expiry.
//! - No depth cap. Entries whose window has elapsed are dropped on the next
//!   enqueue, so the raw length is bounded by the traffic of one window.

use crate::model::notification::{Notification, NotificationId, NotificationKind};

/// Display window of every notification, in milliseconds.
pub const NOTIFICATION_TTL_MS: i64 = 4_000;

/// Arrival-ordered queue of live notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the tail and returns its fresh id.
    ///
    /// Entries already expired at `now_ms` are dropped first.
    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now_ms: i64,
    ) -> NotificationId {
        self.prune_expired(now_ms);
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        self.entries.push(Notification {
            id,
            message: message.into(),
            kind,
            created_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(NOTIFICATION_TTL_MS),
        });
        id
    }

    /// Removes one entry immediately. Unknown ids are ignored.
    ///
    /// Returns whether an entry was removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Entries still inside their display window at `now_ms`, oldest first.
    pub fn active_at(&self, now_ms: i64) -> Vec<&Notification> {
        self.entries
            .iter()
            .filter(|entry| entry.is_live_at(now_ms))
            .collect()
    }

    /// Drops every entry whose window has elapsed at `now_ms`.
    ///
    /// Returns the number of dropped entries.
    pub fn prune_expired(&mut self, now_ms: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.is_live_at(now_ms));
        before - self.entries.len()
    }

    /// Raw entry count, including entries not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationQueue, NOTIFICATION_TTL_MS};
    use crate::model::notification::NotificationKind;

    #[test]
    fn ids_are_not_reused_after_dismissal() {
        let mut queue = NotificationQueue::new();
        let first = queue.enqueue("a", NotificationKind::Info, 0);
        queue.dismiss(first);
        let second = queue.enqueue("b", NotificationKind::Info, 0);
        assert_ne!(first, second);
    }

    #[test]
    fn entry_expires_exactly_at_window_end() {
        let mut queue = NotificationQueue::new();
        queue.enqueue("a", NotificationKind::Success, 100);
        assert_eq!(queue.active_at(100 + NOTIFICATION_TTL_MS - 1).len(), 1);
        assert!(queue.active_at(100 + NOTIFICATION_TTL_MS).is_empty());
    }

    #[test]
    fn prune_only_drops_elapsed_entries() {
        let mut queue = NotificationQueue::new();
        queue.enqueue("old", NotificationKind::Info, 0);
        queue.enqueue("new", NotificationKind::Info, 3_000);
        assert_eq!(queue.prune_expired(4_500), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.active_at(4_500)[0].message, "new");
    }

    #[test]
    fn enqueue_drops_elapsed_entries() {
        let mut queue = NotificationQueue::new();
        for step in 0..10_000 {
            queue.enqueue("tick", NotificationKind::Info, step * 10_000);
        }
        assert_eq!(queue.len(), 1);
    }
}
