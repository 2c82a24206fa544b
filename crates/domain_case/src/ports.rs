//! Case Domain Ports
//!
//! The `CasePort` trait defines the operations the case domain needs from
//! the case store. Adapters implement it over the document store
//! (`infra_store`) or in memory for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{AttachmentId, CaseId, DomainPort, OperationMetadata, PortError};

use crate::case::{Case, CaseStatus};

/// Port for case persistence
///
/// The case store sees lower write contention than the engagement record:
/// only the owner mutates a case, and status flips happen under the
/// engagement's per-case serialization.
#[async_trait]
pub trait CasePort: DomainPort {
    /// Retrieves a case by ID
    async fn get_case(
        &self,
        id: CaseId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError>;

    /// Persists a new case
    async fn create_case(
        &self,
        case: &Case,
        metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError>;

    /// Lists the cases owned by a client, newest first
    async fn list_cases_by_owner(
        &self,
        owner_id: core_kernel::PartyId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Case>, PortError>;

    /// Updates the case status
    ///
    /// The transition itself is validated by the aggregate before the
    /// adapter is called; the adapter only persists.
    async fn set_status(
        &self,
        id: CaseId,
        status: CaseStatus,
        metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError>;
}

/// A resolved case attachment, as served by the blob-store collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentInfo {
    pub id: AttachmentId,
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub url: String,
}

/// Port for the external blob-store collaborator
///
/// Resolves attachment ids to display metadata on read paths. Attachments
/// the blob store no longer knows about resolve to None rather than
/// failing the whole case view.
#[async_trait]
pub trait BlobStorePort: DomainPort {
    async fn resolve_attachment(
        &self,
        id: AttachmentId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<AttachmentInfo>, PortError>;
}

/// Mock implementations of the case ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of CasePort
    #[derive(Debug, Default)]
    pub struct MockCasePort {
        cases: Arc<RwLock<HashMap<CaseId, Case>>>,
    }

    impl MockCasePort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with cases for testing
        pub async fn with_cases(cases: Vec<Case>) -> Self {
            let port = Self::new();
            for case in cases {
                port.cases.write().await.insert(case.id, case);
            }
            port
        }
    }

    impl DomainPort for MockCasePort {}

    #[async_trait]
    impl CasePort for MockCasePort {
        async fn get_case(
            &self,
            id: CaseId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Case, PortError> {
            self.cases
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Case", id))
        }

        async fn create_case(
            &self,
            case: &Case,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Case, PortError> {
            let mut cases = self.cases.write().await;
            if cases.contains_key(&case.id) {
                return Err(PortError::conflict(format!("case {} already exists", case.id)));
            }
            cases.insert(case.id, case.clone());
            Ok(case.clone())
        }

        async fn list_cases_by_owner(
            &self,
            owner_id: core_kernel::PartyId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Case>, PortError> {
            let cases = self.cases.read().await;
            let mut owned: Vec<Case> = cases
                .values()
                .filter(|c| c.owner_id == owner_id)
                .cloned()
                .collect();
            owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(owned)
        }

        async fn set_status(
            &self,
            id: CaseId,
            status: CaseStatus,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Case, PortError> {
            let mut cases = self.cases.write().await;
            let case = cases
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Case", id))?;
            case.status = status;
            case.updated_at = Utc::now();
            Ok(case.clone())
        }
    }

    /// In-memory mock implementation of BlobStorePort
    #[derive(Debug, Default)]
    pub struct MockBlobStore {
        attachments: Arc<RwLock<HashMap<AttachmentId, AttachmentInfo>>>,
    }

    impl MockBlobStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn insert(&self, info: AttachmentInfo) {
            self.attachments.write().await.insert(info.id, info);
        }
    }

    impl DomainPort for MockBlobStore {}

    #[async_trait]
    impl BlobStorePort for MockBlobStore {
        async fn resolve_attachment(
            &self,
            id: AttachmentId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<AttachmentInfo>, PortError> {
            Ok(self.attachments.read().await.get(&id).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCasePort;
    use super::*;
    use crate::case::CaseType;
    use core_kernel::PartyId;

    fn test_case(owner: PartyId) -> Case {
        Case::open(owner, "Visa sponsorship appeal", CaseType::Immigration, "applicant", None)
            .unwrap()
    }

    #[tokio::test]
    async fn test_mock_port_create_and_get() {
        let port = MockCasePort::new();
        let case = test_case(PartyId::new());

        port.create_case(&case, None).await.unwrap();
        let retrieved = port.get_case(case.id, None).await.unwrap();
        assert_eq!(retrieved.id, case.id);
        assert_eq!(retrieved.title, case.title);
    }

    #[tokio::test]
    async fn test_mock_port_duplicate_create_conflicts() {
        let port = MockCasePort::new();
        let case = test_case(PartyId::new());

        port.create_case(&case, None).await.unwrap();
        assert!(port.create_case(&case, None).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_port_not_found() {
        let port = MockCasePort::new();
        let result = port.get_case(CaseId::new(), None).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_port_list_by_owner() {
        let port = MockCasePort::new();
        let owner = PartyId::new();

        port.create_case(&test_case(owner), None).await.unwrap();
        port.create_case(&test_case(owner), None).await.unwrap();
        port.create_case(&test_case(PartyId::new()), None).await.unwrap();

        let owned = port.list_cases_by_owner(owner, None).await.unwrap();
        assert_eq!(owned.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_port_set_status() {
        let port = MockCasePort::new();
        let case = test_case(PartyId::new());
        port.create_case(&case, None).await.unwrap();

        let updated = port.set_status(case.id, CaseStatus::InProgress, None).await.unwrap();
        assert_eq!(updated.status, CaseStatus::InProgress);
    }
}
