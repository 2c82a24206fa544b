//! Notification DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::{CaseId, NotificationId};
use domain_notification::{Notification, NotificationKind};

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub case_id: CaseId,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            message: notification.message,
            case_id: notification.case_id,
            url: notification.url,
            timestamp: notification.timestamp,
            read: notification.read,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InboxResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: usize,
}
