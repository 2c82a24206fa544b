//! Notification inbox aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{NotificationId, PartyId};

use crate::notification::Notification;

/// A user's notification inbox
///
/// Created lazily on first notification; grows append-only. The unread
/// count is a derived value: every mutation recomputes it by a full scan
/// instead of maintaining an incremental counter, so it can never drift
/// from the entries themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationInbox {
    /// The inbox owner
    pub user_id: PartyId,
    /// All notifications, in enqueue order
    pub notifications: Vec<Notification>,
    /// Number of unread entries; always recomputed, never incremented
    pub unread_count: usize,
    /// Last time the user marked anything read
    pub last_read: Option<DateTime<Utc>>,
    /// Optimistic-concurrency token for conditional writes
    pub version: u64,
}

impl NotificationInbox {
    /// Creates an empty inbox for a user
    pub fn new(user_id: PartyId) -> Self {
        Self {
            user_id,
            notifications: Vec::new(),
            unread_count: 0,
            last_read: None,
            version: 0,
        }
    }

    /// Appends a notification and recomputes the unread count
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
        self.recompute_unread();
    }

    /// Marks the matching entry read; returns false if no entry matched
    ///
    /// Only the targeted entry is flipped. The unread count is recomputed
    /// from scratch afterwards.
    pub fn mark_read(&mut self, notification_id: NotificationId) -> bool {
        let mut found = false;
        for entry in &mut self.notifications {
            if entry.id == notification_id {
                entry.read = true;
                found = true;
                break;
            }
        }
        if found {
            self.last_read = Some(Utc::now());
            self.recompute_unread();
        }
        found
    }

    /// Returns notifications newest-first for display
    pub fn newest_first(&self) -> Vec<Notification> {
        let mut entries = self.notifications.clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    fn recompute_unread(&mut self) {
        self.unread_count = self.notifications.iter().filter(|n| !n.read).count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{NotificationDraft, NotificationKind};
    use core_kernel::CaseId;

    fn entry(message: &str) -> Notification {
        NotificationDraft::new(NotificationKind::NewApplication, message, CaseId::new())
            .into_notification()
    }

    #[test]
    fn test_push_tracks_unread() {
        let mut inbox = NotificationInbox::new(PartyId::new());
        inbox.push(entry("first"));
        inbox.push(entry("second"));
        assert_eq!(inbox.unread_count, 2);
        assert_eq!(inbox.notifications.len(), 2);
    }

    #[test]
    fn test_mark_read_flips_only_target() {
        let mut inbox = NotificationInbox::new(PartyId::new());
        inbox.push(entry("first"));
        inbox.push(entry("second"));
        let target = inbox.notifications[0].id;

        assert!(inbox.mark_read(target));
        assert_eq!(inbox.unread_count, 1);
        assert!(inbox.notifications[0].read);
        assert!(!inbox.notifications[1].read);
        assert!(inbox.last_read.is_some());
    }

    #[test]
    fn test_mark_read_unknown_id() {
        let mut inbox = NotificationInbox::new(PartyId::new());
        inbox.push(entry("only"));
        assert!(!inbox.mark_read(NotificationId::new()));
        assert_eq!(inbox.unread_count, 1);
        assert!(inbox.last_read.is_none());
    }

    #[test]
    fn test_mark_read_is_idempotent_for_count() {
        let mut inbox = NotificationInbox::new(PartyId::new());
        inbox.push(entry("only"));
        let id = inbox.notifications[0].id;
        inbox.mark_read(id);
        inbox.mark_read(id);
        // Recomputation keeps the count at zero, no stale decrement
        assert_eq!(inbox.unread_count, 0);
    }
}
