//! Engagement Domain Ports
//!
//! `EngagementStorePort` is the persistence seam for the engagement record
//! and its child collections (timeline events, messages). The engagement
//! record itself is the document under write contention, so its save is
//! version-conditional; timeline and message appends are plain inserts
//! into child collections and need no version.
//!
//! `ProfileDirectoryPort` is the external collaborator that resolves a
//! lawyer id into a display profile for applicant listings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{CaseId, DomainPort, OperationMetadata, PartyId, PortError};

use crate::engagement::EngagementRecord;
use crate::message::Message;
use crate::timeline::TimelineEvent;

/// Port for engagement persistence
#[async_trait]
pub trait EngagementStorePort: DomainPort {
    /// Retrieves the engagement record for a case
    async fn get_engagement(
        &self,
        case_id: CaseId,
        metadata: Option<OperationMetadata>,
    ) -> Result<EngagementRecord, PortError>;

    /// Persists a freshly created engagement record
    async fn create_engagement(
        &self,
        record: &EngagementRecord,
        metadata: Option<OperationMetadata>,
    ) -> Result<EngagementRecord, PortError>;

    /// Conditionally replaces the engagement record keyed on its version
    ///
    /// Must fail with `PortError::VersionConflict` when the stored version
    /// no longer matches `expected_version`; stores the record with
    /// `expected_version + 1` and returns the stored copy.
    async fn save_engagement(
        &self,
        record: &EngagementRecord,
        expected_version: u64,
        metadata: Option<OperationMetadata>,
    ) -> Result<EngagementRecord, PortError>;

    /// Appends an audit event to the case's timeline
    async fn append_event(
        &self,
        event: &TimelineEvent,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Lists a case's timeline, oldest first
    async fn list_events(
        &self,
        case_id: CaseId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<TimelineEvent>, PortError>;

    /// Appends a message to the case's channel
    async fn append_message(
        &self,
        message: &Message,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Lists a case's messages, oldest first
    async fn list_messages(
        &self,
        case_id: CaseId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Message>, PortError>;
}

/// A lawyer's display profile, as served by the profile directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawyerProfile {
    pub party_id: PartyId,
    pub display_name: String,
    pub firm: Option<String>,
    pub practice_areas: Vec<String>,
}

/// Port for the external profile-directory collaborator
#[async_trait]
pub trait ProfileDirectoryPort: DomainPort {
    /// Resolves a lawyer id to a display profile
    ///
    /// Returns None for unknown ids; listings degrade to id-only entries
    /// instead of failing outright.
    async fn get_profile(
        &self,
        party_id: PartyId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<LawyerProfile>, PortError>;
}

/// Mock implementations of the engagement ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of EngagementStorePort
    ///
    /// Honors the version-conditional save contract, so concurrency tests
    /// behave like the real document store.
    #[derive(Debug, Default)]
    pub struct MockEngagementStore {
        engagements: Arc<RwLock<HashMap<CaseId, EngagementRecord>>>,
        events: Arc<RwLock<Vec<TimelineEvent>>>,
        messages: Arc<RwLock<Vec<Message>>>,
        /// When set, the next N saves fail with a version conflict
        fail_saves: Arc<RwLock<u32>>,
    }

    impl MockEngagementStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes the next `n` saves fail with a version conflict
        pub async fn fail_next_saves(&self, n: u32) {
            *self.fail_saves.write().await = n;
        }
    }

    impl DomainPort for MockEngagementStore {}

    #[async_trait]
    impl EngagementStorePort for MockEngagementStore {
        async fn get_engagement(
            &self,
            case_id: CaseId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<EngagementRecord, PortError> {
            self.engagements
                .read()
                .await
                .get(&case_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Engagement", case_id))
        }

        async fn create_engagement(
            &self,
            record: &EngagementRecord,
            _metadata: Option<OperationMetadata>,
        ) -> Result<EngagementRecord, PortError> {
            let mut engagements = self.engagements.write().await;
            if engagements.contains_key(&record.case_id) {
                return Err(PortError::conflict(format!(
                    "engagement for case {} already exists",
                    record.case_id
                )));
            }
            engagements.insert(record.case_id, record.clone());
            Ok(record.clone())
        }

        async fn save_engagement(
            &self,
            record: &EngagementRecord,
            expected_version: u64,
            _metadata: Option<OperationMetadata>,
        ) -> Result<EngagementRecord, PortError> {
            {
                let mut fail = self.fail_saves.write().await;
                if *fail > 0 {
                    *fail -= 1;
                    return Err(PortError::version_conflict("Engagement", record.case_id));
                }
            }

            let mut engagements = self.engagements.write().await;
            let stored = engagements
                .get(&record.case_id)
                .ok_or_else(|| PortError::not_found("Engagement", record.case_id))?;
            if stored.version != expected_version {
                return Err(PortError::version_conflict("Engagement", record.case_id));
            }
            let mut updated = record.clone();
            updated.version = expected_version + 1;
            engagements.insert(updated.case_id, updated.clone());
            Ok(updated)
        }

        async fn append_event(
            &self,
            event: &TimelineEvent,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.events.write().await.push(event.clone());
            Ok(())
        }

        async fn list_events(
            &self,
            case_id: CaseId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<TimelineEvent>, PortError> {
            let mut events: Vec<TimelineEvent> = self
                .events
                .read()
                .await
                .iter()
                .filter(|e| e.case_id == case_id)
                .cloned()
                .collect();
            events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            Ok(events)
        }

        async fn append_message(
            &self,
            message: &Message,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.messages.write().await.push(message.clone());
            Ok(())
        }

        async fn list_messages(
            &self,
            case_id: CaseId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Message>, PortError> {
            let mut messages: Vec<Message> = self
                .messages
                .read()
                .await
                .iter()
                .filter(|m| m.case_id == case_id)
                .cloned()
                .collect();
            messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            Ok(messages)
        }
    }

    /// In-memory mock implementation of ProfileDirectoryPort
    #[derive(Debug, Default)]
    pub struct MockProfileDirectory {
        profiles: Arc<RwLock<HashMap<PartyId, LawyerProfile>>>,
    }

    impl MockProfileDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn insert(&self, profile: LawyerProfile) {
            self.profiles.write().await.insert(profile.party_id, profile);
        }
    }

    impl DomainPort for MockProfileDirectory {}

    #[async_trait]
    impl ProfileDirectoryPort for MockProfileDirectory {
        async fn get_profile(
            &self,
            party_id: PartyId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<LawyerProfile>, PortError> {
            Ok(self.profiles.read().await.get(&party_id).cloned())
        }
    }
}
