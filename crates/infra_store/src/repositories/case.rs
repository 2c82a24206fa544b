//! Case repository

use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{CaseId, DomainPort, OperationMetadata, PartyId, PortError};
use domain_case::{Case, CasePort, CaseStatus};

use crate::store::{DocumentStore, Fields};

use super::{from_document, to_fields};

const CASES: &str = "cases";

/// `CasePort` over the document store
#[derive(Clone)]
pub struct CaseRepository {
    store: Arc<dyn DocumentStore>,
}

impl CaseRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl DomainPort for CaseRepository {}

#[async_trait]
impl CasePort for CaseRepository {
    async fn get_case(
        &self,
        id: CaseId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError> {
        let doc = self.store.get(CASES, &id.to_string()).await?;
        Ok(from_document(doc)?)
    }

    async fn create_case(
        &self,
        case: &Case,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError> {
        let fields = to_fields(case)?;
        let doc = self
            .store
            .create(CASES, &case.id.to_string(), fields)
            .await?;
        Ok(from_document(doc)?)
    }

    async fn list_cases_by_owner(
        &self,
        owner_id: PartyId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Case>, PortError> {
        // Ids display with a type prefix but serialize as bare UUIDs, so
        // the filter value must go through serde
        let mut filter = Fields::new();
        filter.insert(
            "owner_id".to_string(),
            serde_json::to_value(owner_id).map_err(crate::error::StoreError::from)?,
        );

        let docs = self.store.list(CASES, &filter).await?;
        let mut cases: Vec<Case> = docs
            .into_iter()
            .map(from_document)
            .collect::<Result<_, _>>()?;
        cases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cases)
    }

    async fn set_status(
        &self,
        id: CaseId,
        status: CaseStatus,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError> {
        let patch = serde_json::json!({
            "status": status,
            "updated_at": chrono::Utc::now(),
        });
        let fields = to_fields(&patch)?;

        let doc = self.store.update(CASES, &id.to_string(), fields).await?;
        Ok(from_document(doc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use domain_case::CaseType;

    fn repo() -> CaseRepository {
        CaseRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_and_get_case() {
        let repo = repo();
        let case = Case::open(PartyId::new(), "Visa appeal", CaseType::Immigration, "applicant", None)
            .unwrap();

        repo.create_case(&case, None).await.unwrap();
        let found = repo.get_case(case.id, None).await.unwrap();
        assert_eq!(found.title, "Visa appeal");
        assert_eq!(found.status, CaseStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_missing_case() {
        let repo = repo();
        let result = repo.get_case(CaseId::new(), None).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_first() {
        let repo = repo();
        let owner = PartyId::new();

        for title in ["first", "second", "third"] {
            let case = Case::open(owner, title, CaseType::Civil, "plaintiff", None).unwrap();
            repo.create_case(&case, None).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        let other = Case::open(PartyId::new(), "other", CaseType::Civil, "p", None).unwrap();
        repo.create_case(&other, None).await.unwrap();

        let cases = repo.list_cases_by_owner(owner, None).await.unwrap();
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[0].title, "third");
        assert_eq!(cases[2].title, "first");
    }

    #[tokio::test]
    async fn test_set_status_persists() {
        let repo = repo();
        let case = Case::open(PartyId::new(), "t", CaseType::Civil, "p", None).unwrap();
        repo.create_case(&case, None).await.unwrap();

        let updated = repo
            .set_status(case.id, CaseStatus::InProgress, None)
            .await
            .unwrap();
        assert_eq!(updated.status, CaseStatus::InProgress);
        assert!(updated.updated_at >= case.updated_at);
    }
}
