//! Inbox repository

use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{DomainPort, OperationMetadata, PartyId, PortError};
use domain_notification::{InboxPort, NotificationInbox};

use crate::error::StoreError;
use crate::store::DocumentStore;

use super::{from_document, to_fields};

const INBOXES: &str = "inboxes";

/// `InboxPort` over the document store
#[derive(Clone)]
pub struct InboxRepository {
    store: Arc<dyn DocumentStore>,
}

impl InboxRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl DomainPort for InboxRepository {}

#[async_trait]
impl InboxPort for InboxRepository {
    async fn get_inbox(
        &self,
        user_id: PartyId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<NotificationInbox>, PortError> {
        match self.store.get(INBOXES, &user_id.to_string()).await {
            Ok(doc) => Ok(Some(from_document(doc)?)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_inbox(
        &self,
        inbox: &NotificationInbox,
        _metadata: Option<OperationMetadata>,
    ) -> Result<NotificationInbox, PortError> {
        let fields = to_fields(inbox)?;
        let doc = self
            .store
            .create(INBOXES, &inbox.user_id.to_string(), fields)
            .await?;
        Ok(from_document(doc)?)
    }

    async fn save_inbox(
        &self,
        inbox: &NotificationInbox,
        expected_version: u64,
        _metadata: Option<OperationMetadata>,
    ) -> Result<NotificationInbox, PortError> {
        let fields = to_fields(inbox)?;
        let doc = self
            .store
            .update_if_version(INBOXES, &inbox.user_id.to_string(), expected_version, fields)
            .await?;
        Ok(from_document(doc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use core_kernel::CaseId;
    use domain_notification::{NotificationDraft, NotificationKind};

    fn repo() -> InboxRepository {
        InboxRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_missing_inbox_is_none() {
        let repo = repo();
        let inbox = repo.get_inbox(PartyId::new(), None).await.unwrap();
        assert!(inbox.is_none());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = repo();
        let user_id = PartyId::new();
        repo.create_inbox(&NotificationInbox::new(user_id), None)
            .await
            .unwrap();

        let inbox = repo.get_inbox(user_id, None).await.unwrap().unwrap();
        assert_eq!(inbox.user_id, user_id);
        assert_eq!(inbox.unread_count, 0);
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let repo = repo();
        let inbox = NotificationInbox::new(PartyId::new());
        repo.create_inbox(&inbox, None).await.unwrap();
        let result = repo.create_inbox(&inbox, None).await;
        assert!(matches!(result, Err(PortError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_save_is_version_conditional() {
        let repo = repo();
        let user_id = PartyId::new();
        let mut inbox = NotificationInbox::new(user_id);
        repo.create_inbox(&inbox, None).await.unwrap();

        inbox.push(
            NotificationDraft::new(NotificationKind::NewApplication, "hi", CaseId::new())
                .into_notification(),
        );
        let stored = repo.save_inbox(&inbox, 0, None).await.unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.unread_count, 1);

        let stale = repo.save_inbox(&inbox, 0, None).await;
        assert!(stale.unwrap_err().is_version_conflict());
    }
}
