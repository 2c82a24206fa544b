//! Blob store adapter

use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{AttachmentId, DomainPort, OperationMetadata, PortError};
use domain_case::{AttachmentInfo, BlobStorePort};

use crate::error::StoreError;
use crate::repositories::{from_document, to_fields};
use crate::store::DocumentStore;

const ATTACHMENTS: &str = "attachments";

/// `BlobStorePort` over the document store
///
/// Stores attachment metadata only; the bytes live behind the `url`.
#[derive(Clone)]
pub struct StoreBlobStore {
    store: Arc<dyn DocumentStore>,
}

impl StoreBlobStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Registers attachment metadata after an upload
    pub async fn put_attachment(&self, info: &AttachmentInfo) -> Result<(), PortError> {
        let fields = to_fields(info)?;
        self.store
            .create(ATTACHMENTS, &info.id.to_string(), fields)
            .await?;
        Ok(())
    }
}

impl DomainPort for StoreBlobStore {}

#[async_trait]
impl BlobStorePort for StoreBlobStore {
    async fn resolve_attachment(
        &self,
        id: AttachmentId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<AttachmentInfo>, PortError> {
        match self.store.get(ATTACHMENTS, &id.to_string()).await {
            Ok(doc) => Ok(Some(from_document(doc)?)),
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
    async fn test_resolve_known_and_unknown_attachments() {
        let blobs = StoreBlobStore::new(Arc::new(MemoryStore::new()));
        let id = AttachmentId::new();

        blobs
            .put_attachment(&AttachmentInfo {
                id,
                name: "lease.pdf".to_string(),
                size_bytes: 48_213,
                mime_type: "application/pdf".to_string(),
                url: format!("/blobs/{}", id),
            })
            .await
            .unwrap();

        let info = blobs.resolve_attachment(id, None).await.unwrap().unwrap();
        assert_eq!(info.name, "lease.pdf");

        let gone = blobs.resolve_attachment(AttachmentId::new(), None).await.unwrap();
        assert!(gone.is_none());
    }
}
