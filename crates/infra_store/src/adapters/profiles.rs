//! Profile directory adapter

use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{DomainPort, OperationMetadata, PartyId, PortError};
use domain_engagement::{LawyerProfile, ProfileDirectoryPort};

use crate::error::StoreError;
use crate::store::DocumentStore;

const PROFILES: &str = "profiles";

/// `ProfileDirectoryPort` over the document store
#[derive(Clone)]
pub struct StoreProfileDirectory {
    store: Arc<dyn DocumentStore>,
}

impl StoreProfileDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Registers a profile, used at startup seeding and in tests
    pub async fn put_profile(&self, profile: &LawyerProfile) -> Result<(), PortError> {
        let fields = crate::repositories::to_fields(profile)?;
        match self
            .store
            .create(PROFILES, &profile.party_id.to_string(), fields.clone())
            .await
        {
            Ok(_) => Ok(()),
            Err(StoreError::AlreadyExists { .. }) => {
                self.store
                    .update(PROFILES, &profile.party_id.to_string(), fields)
                    .await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl DomainPort for StoreProfileDirectory {}

#[async_trait]
impl ProfileDirectoryPort for StoreProfileDirectory {
    async fn get_profile(
        &self,
        party_id: PartyId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<LawyerProfile>, PortError> {
        match self.store.get(PROFILES, &party_id.to_string()).await {
            Ok(doc) => Ok(Some(crate::repositories::from_document(doc)?)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_put_and_resolve_profile() {
        let directory = StoreProfileDirectory::new(Arc::new(MemoryStore::new()));
        let party_id = PartyId::new();

        directory
            .put_profile(&LawyerProfile {
                party_id,
                display_name: "Ada Okafor".to_string(),
                firm: None,
                practice_areas: vec!["family".to_string()],
            })
            .await
            .unwrap();

        let profile = directory.get_profile(party_id, None).await.unwrap().unwrap();
        assert_eq!(profile.display_name, "Ada Okafor");

        let unknown = directory.get_profile(PartyId::new(), None).await.unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_profile() {
        let directory = StoreProfileDirectory::new(Arc::new(MemoryStore::new()));
        let party_id = PartyId::new();
        let mut profile = LawyerProfile {
            party_id,
            display_name: "Before".to_string(),
            firm: None,
            practice_areas: vec![],
        };

        directory.put_profile(&profile).await.unwrap();
        profile.display_name = "After".to_string();
        directory.put_profile(&profile).await.unwrap();

        let stored = directory.get_profile(party_id, None).await.unwrap().unwrap();
        assert_eq!(stored.display_name, "After");
    }
}
