//! Notification Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainPort, OperationMetadata, PartyId, PortError};

use crate::inbox::NotificationInbox;

/// Port for inbox persistence
///
/// The inbox is a single document under concurrent append pressure, so all
/// writes are version-conditional: `save_inbox` must fail with
/// `PortError::VersionConflict` when the stored version no longer matches
/// `expected_version`. The adapter stores the inbox with
/// `expected_version + 1` and returns the stored copy.
#[async_trait]
pub trait InboxPort: DomainPort {
    /// Retrieves a user's inbox, or None if it was never created
    async fn get_inbox(
        &self,
        user_id: PartyId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<NotificationInbox>, PortError>;

    /// Creates a new inbox; fails with Conflict if one already exists
    async fn create_inbox(
        &self,
        inbox: &NotificationInbox,
        metadata: Option<OperationMetadata>,
    ) -> Result<NotificationInbox, PortError>;

    /// Conditionally replaces an inbox keyed on its version
    async fn save_inbox(
        &self,
        inbox: &NotificationInbox,
        expected_version: u64,
        metadata: Option<OperationMetadata>,
    ) -> Result<NotificationInbox, PortError>;
}

/// Mock implementation of InboxPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of InboxPort
    #[derive(Debug, Default)]
    pub struct MockInboxPort {
        inboxes: Arc<RwLock<HashMap<PartyId, NotificationInbox>>>,
        /// When set, the next N saves fail with a version conflict
        fail_saves: Arc<RwLock<u32>>,
    }

    impl MockInboxPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes the next `n` saves fail with a version conflict, to
        /// exercise the retry path
        pub async fn fail_next_saves(&self, n: u32) {
            *self.fail_saves.write().await = n;
        }
    }

    impl DomainPort for MockInboxPort {}

    #[async_trait]
    impl InboxPort for MockInboxPort {
        async fn get_inbox(
            &self,
            user_id: PartyId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<NotificationInbox>, PortError> {
            Ok(self.inboxes.read().await.get(&user_id).cloned())
        }

        async fn create_inbox(
            &self,
            inbox: &NotificationInbox,
            _metadata: Option<OperationMetadata>,
        ) -> Result<NotificationInbox, PortError> {
            let mut inboxes = self.inboxes.write().await;
            if inboxes.contains_key(&inbox.user_id) {
                return Err(PortError::conflict(format!(
                    "inbox for {} already exists",
                    inbox.user_id
                )));
            }
            inboxes.insert(inbox.user_id, inbox.clone());
            Ok(inbox.clone())
        }

        async fn save_inbox(
            &self,
            inbox: &NotificationInbox,
            expected_version: u64,
            _metadata: Option<OperationMetadata>,
        ) -> Result<NotificationInbox, PortError> {
            {
                let mut fail = self.fail_saves.write().await;
                if *fail > 0 {
                    *fail -= 1;
                    return Err(PortError::version_conflict("Inbox", inbox.user_id));
                }
            }

            let mut inboxes = self.inboxes.write().await;
            let stored = inboxes
                .get(&inbox.user_id)
                .ok_or_else(|| PortError::not_found("Inbox", inbox.user_id))?;
            if stored.version != expected_version {
                return Err(PortError::version_conflict("Inbox", inbox.user_id));
            }
            let mut updated = inbox.clone();
            updated.version = expected_version + 1;
            inboxes.insert(updated.user_id, updated.clone());
            Ok(updated)
        }
    }
}
