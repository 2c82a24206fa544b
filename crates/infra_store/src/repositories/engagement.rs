//! Engagement repository
//!
//! The engagement record is the versioned document; timeline events and
//! messages are child collections filtered by `case_id`, appended with
//! plain creates so they never contend with the engagement write.

use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{CaseId, DomainPort, OperationMetadata, PortError};
use domain_engagement::{EngagementRecord, EngagementStorePort, Message, TimelineEvent};

use crate::store::{DocumentStore, Fields};

use super::{from_document, to_fields};

const ENGAGEMENTS: &str = "engagements";
const TIMELINE_EVENTS: &str = "timeline_events";
const MESSAGES: &str = "messages";

/// `EngagementStorePort` over the document store
#[derive(Clone)]
pub struct EngagementRepository {
    store: Arc<dyn DocumentStore>,
}

impl EngagementRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // Ids serialize as bare UUIDs, so the filter value goes through serde
    // rather than Display
    fn case_filter(case_id: CaseId) -> Result<Fields, PortError> {
        let mut filter = Fields::new();
        filter.insert(
            "case_id".to_string(),
            serde_json::to_value(case_id).map_err(crate::error::StoreError::from)?,
        );
        Ok(filter)
    }
}

impl DomainPort for EngagementRepository {}

#[async_trait]
impl EngagementStorePort for EngagementRepository {
    async fn get_engagement(
        &self,
        case_id: CaseId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<EngagementRecord, PortError> {
        let doc = self.store.get(ENGAGEMENTS, &case_id.to_string()).await?;
        Ok(from_document(doc)?)
    }

    async fn create_engagement(
        &self,
        record: &EngagementRecord,
        _metadata: Option<OperationMetadata>,
    ) -> Result<EngagementRecord, PortError> {
        let fields = to_fields(record)?;
        let doc = self
            .store
            .create(ENGAGEMENTS, &record.case_id.to_string(), fields)
            .await?;
        Ok(from_document(doc)?)
    }

    async fn save_engagement(
        &self,
        record: &EngagementRecord,
        expected_version: u64,
        _metadata: Option<OperationMetadata>,
    ) -> Result<EngagementRecord, PortError> {
        let fields = to_fields(record)?;
        let doc = self
            .store
            .update_if_version(
                ENGAGEMENTS,
                &record.case_id.to_string(),
                expected_version,
                fields,
            )
            .await?;
        Ok(from_document(doc)?)
    }

    async fn append_event(
        &self,
        event: &TimelineEvent,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        let fields = to_fields(event)?;
        self.store
            .create(TIMELINE_EVENTS, &event.id.to_string(), fields)
            .await?;
        Ok(())
    }

    async fn list_events(
        &self,
        case_id: CaseId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<TimelineEvent>, PortError> {
        let docs = self
            .store
            .list(TIMELINE_EVENTS, &Self::case_filter(case_id)?)
            .await?;
        let mut events: Vec<TimelineEvent> = docs
            .into_iter()
            .map(from_document)
            .collect::<Result<_, _>>()?;
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn append_message(
        &self,
        message: &Message,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        let fields = to_fields(message)?;
        self.store
            .create(MESSAGES, &message.id.to_string(), fields)
            .await?;
        Ok(())
    }

    async fn list_messages(
        &self,
        case_id: CaseId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Message>, PortError> {
        let docs = self.store.list(MESSAGES, &Self::case_filter(case_id)?).await?;
        let mut messages: Vec<Message> = docs
            .into_iter()
            .map(from_document)
            .collect::<Result<_, _>>()?;
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use core_kernel::{ActorRole, PartyId};
    use domain_engagement::{Application, TimelineAction};

    fn repo() -> EngagementRepository {
        EngagementRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_engagement_roundtrip_with_applications() {
        let repo = repo();
        let case_id = CaseId::new();

        let mut record = EngagementRecord::new(case_id);
        record
            .record_application(Application::submit(PartyId::new(), "cover"))
            .unwrap();
        repo.create_engagement(&record, None).await.unwrap();

        let found = repo.get_engagement(case_id, None).await.unwrap();
        assert_eq!(found.applications.len(), 1);
        assert_eq!(found.version, 0);
    }

    #[tokio::test]
    async fn test_save_bumps_version_and_rejects_stale_writer() {
        let repo = repo();
        let case_id = CaseId::new();
        let record = EngagementRecord::new(case_id);
        repo.create_engagement(&record, None).await.unwrap();

        let stored = repo.save_engagement(&record, 0, None).await.unwrap();
        assert_eq!(stored.version, 1);

        let stale = repo.save_engagement(&record, 0, None).await;
        assert!(stale.unwrap_err().is_version_conflict());
    }

    #[tokio::test]
    async fn test_events_listed_oldest_first_per_case() {
        let repo = repo();
        let case_id = CaseId::new();
        let other = CaseId::new();
        let actor = PartyId::new();

        for action in [
            TimelineAction::CaseOpened,
            TimelineAction::ApplicationSubmitted,
            TimelineAction::LawyerAssigned,
        ] {
            let event = TimelineEvent::record(case_id, action, actor, ActorRole::Client);
            repo.append_event(&event, None).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        let noise = TimelineEvent::record(other, TimelineAction::CaseOpened, actor, ActorRole::Client);
        repo.append_event(&noise, None).await.unwrap();

        let events = repo.list_events(case_id, None).await.unwrap();
        let actions: Vec<_> = events.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                TimelineAction::CaseOpened,
                TimelineAction::ApplicationSubmitted,
                TimelineAction::LawyerAssigned,
            ]
        );
    }

    #[tokio::test]
    async fn test_messages_scoped_to_case() {
        let repo = repo();
        let case_id = CaseId::new();
        let sender = PartyId::new();

        let message = Message::send(case_id, "hello", sender, ActorRole::Client);
        repo.append_message(&message, None).await.unwrap();
        let noise = Message::send(CaseId::new(), "elsewhere", sender, ActorRole::Client);
        repo.append_message(&noise, None).await.unwrap();

        let messages = repo.list_messages(case_id, None).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "hello");
    }
}
