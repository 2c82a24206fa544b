//! Notification domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the notification domain
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification not found: {0}")]
    NotFound(String),

    #[error("Inbox write contention for user {user_id} after {attempts} attempts")]
    Contention { user_id: String, attempts: u32 },

    #[error("Persistence failure: {0}")]
    Persistence(#[source] PortError),
}

impl From<PortError> for NotificationError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { ref id, .. } => NotificationError::NotFound(id.clone()),
            other => NotificationError::Persistence(other),
        }
    }
}
