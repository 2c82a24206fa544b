//! Notification fan-out service
//!
//! The inbox upsert is a read-modify-write against a single document and is
//! the main concurrency hazard of this domain: two concurrent enqueues for
//! the same user race on the same inbox. Writes are version-conditional and
//! retried a bounded number of times.

use std::sync::Arc;

use core_kernel::{NotificationId, PartyId, PortError};

use crate::error::NotificationError;
use crate::inbox::NotificationInbox;
use crate::notification::{Notification, NotificationDraft};
use crate::ports::InboxPort;

/// Maximum conditional-write attempts before reporting contention
const MAX_WRITE_ATTEMPTS: u32 = 5;

/// Service for inbox delivery and read tracking
pub struct NotificationService {
    inbox_port: Arc<dyn InboxPort>,
}

impl NotificationService {
    pub fn new(inbox_port: Arc<dyn InboxPort>) -> Self {
        Self { inbox_port }
    }

    /// Delivers a notification into a user's inbox
    ///
    /// Creates the inbox lazily on first delivery. The unread count is
    /// recomputed from the entries on every write rather than incremented,
    /// so concurrent retries cannot drift it.
    pub async fn enqueue(
        &self,
        user_id: PartyId,
        draft: NotificationDraft,
    ) -> Result<NotificationInbox, NotificationError> {
        let notification = draft.into_notification();

        for _ in 0..MAX_WRITE_ATTEMPTS {
            match self.inbox_port.get_inbox(user_id, None).await? {
                None => {
                    let mut inbox = NotificationInbox::new(user_id);
                    inbox.push(notification.clone());
                    match self.inbox_port.create_inbox(&inbox, None).await {
                        Ok(stored) => return Ok(stored),
                        // Another writer created the inbox first; retry as an append
                        Err(PortError::Conflict { .. }) => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
                Some(mut inbox) => {
                    let expected = inbox.version;
                    inbox.push(notification.clone());
                    match self.inbox_port.save_inbox(&inbox, expected, None).await {
                        Ok(stored) => return Ok(stored),
                        Err(e) if e.is_version_conflict() => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        }

        Err(NotificationError::Contention {
            user_id: user_id.to_string(),
            attempts: MAX_WRITE_ATTEMPTS,
        })
    }

    /// Marks a single notification read
    ///
    /// Flips only the targeted entry and recomputes the unread count by a
    /// full scan, so a stale increment or decrement can never survive.
    pub async fn mark_read(
        &self,
        user_id: PartyId,
        notification_id: NotificationId,
    ) -> Result<NotificationInbox, NotificationError> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let mut inbox = self
                .inbox_port
                .get_inbox(user_id, None)
                .await?
                .ok_or_else(|| NotificationError::NotFound(user_id.to_string()))?;

            let expected = inbox.version;
            if !inbox.mark_read(notification_id) {
                return Err(NotificationError::NotFound(notification_id.to_string()));
            }

            match self.inbox_port.save_inbox(&inbox, expected, None).await {
                Ok(stored) => return Ok(stored),
                Err(e) if e.is_version_conflict() => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(NotificationError::Contention {
            user_id: user_id.to_string(),
            attempts: MAX_WRITE_ATTEMPTS,
        })
    }

    /// Lists a user's notifications, newest first
    ///
    /// A user who has never been notified simply has no entries.
    pub async fn list_notifications(
        &self,
        user_id: PartyId,
    ) -> Result<Vec<Notification>, NotificationError> {
        match self.inbox_port.get_inbox(user_id, None).await? {
            Some(inbox) => Ok(inbox.newest_first()),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the unread count for a user
    pub async fn unread_count(&self, user_id: PartyId) -> Result<usize, NotificationError> {
        Ok(self
            .inbox_port
            .get_inbox(user_id, None)
            .await?
            .map(|inbox| inbox.unread_count)
            .unwrap_or(0))
    }
}

/// Best-effort fan-out wrapper for business operations
///
/// A primary mutation that already succeeded must never be rolled back
/// because its notification could not be delivered. Every failure here is
/// logged and swallowed.
pub struct Notifier {
    service: Arc<NotificationService>,
}

impl Notifier {
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }

    /// Delivers a notification, swallowing any failure
    pub async fn notify(&self, user_id: PartyId, draft: NotificationDraft) {
        let case_id = draft.case_id;
        if let Err(error) = self.service.enqueue(user_id, draft).await {
            tracing::warn!(
                user_id = %user_id,
                case_id = %case_id,
                %error,
                "notification fan-out failed; continuing without it"
            );
        }
    }
}
