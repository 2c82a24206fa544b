//! Notification entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CaseId, NotificationId};

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A lawyer applied to the recipient's case
    NewApplication,
    /// The recipient's own application was recorded
    ApplicationSubmitted,
    /// The recipient was assigned to a case
    LawyerAssigned,
    /// The recipient's case now has an assigned lawyer
    AssignmentConfirmed,
    /// A case the recipient is involved in was closed
    CaseClosed,
}

/// A single inbox entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,
    /// What this notification is about
    pub kind: NotificationKind,
    /// Human-readable message
    pub message: String,
    /// The case this notification relates to
    pub case_id: CaseId,
    /// Link target for the presentation layer
    pub url: String,
    /// When the notification was enqueued
    pub timestamp: DateTime<Utc>,
    /// Whether the recipient has read it
    pub read: bool,
}

/// The recipient-independent part of a notification
///
/// Business operations build a draft; the fan-out stamps id, timestamp and
/// read state when appending it to an inbox.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub message: String,
    pub case_id: CaseId,
    pub url: String,
}

impl NotificationDraft {
    pub fn new(kind: NotificationKind, message: impl Into<String>, case_id: CaseId) -> Self {
        Self {
            kind,
            message: message.into(),
            case_id,
            url: format!("/cases/{}", case_id),
        }
    }

    /// Stamps the draft into a concrete inbox entry
    pub fn into_notification(self) -> Notification {
        Notification {
            id: NotificationId::new_v7(),
            kind: self.kind,
            message: self.message,
            case_id: self.case_id,
            url: self.url,
            timestamp: Utc::now(),
            read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_stamps_unread_entry() {
        let case_id = CaseId::new();
        let draft = NotificationDraft::new(NotificationKind::NewApplication, "A lawyer applied", case_id);
        let n = draft.into_notification();
        assert!(!n.read);
        assert_eq!(n.case_id, case_id);
        assert_eq!(n.url, format!("/cases/{}", case_id));
    }
}
