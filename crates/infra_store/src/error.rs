//! Store error types
//!
//! This module defines the errors that can occur against the document
//! store and their translation into the domain-facing `PortError`.

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur during document store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found in a collection
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Create collided with an existing document id
    #[error("Document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    /// Conditional write lost the version race
    #[error("Version conflict on {collection}/{id}: expected {expected}, stored {stored}")]
    VersionConflict {
        collection: String,
        id: String,
        expected: u64,
        stored: u64,
    },

    /// Document exists but does not carry a `version` field
    #[error("Document {collection}/{id} is not versioned")]
    NotVersioned { collection: String, id: String },

    /// Document could not be mapped to or from the domain type
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing store is unreachable
    #[error("Store connection failed: {0}")]
    ConnectionFailed(String),
}

impl StoreError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn already_exists(collection: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::AlreadyExists {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<StoreError> for PortError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { collection, id } => PortError::not_found(collection, id),
            StoreError::AlreadyExists { collection, id } => {
                PortError::conflict(format!("{}/{} already exists", collection, id))
            }
            StoreError::VersionConflict { collection, id, .. } => {
                PortError::version_conflict(collection, id)
            }
            StoreError::NotVersioned { collection, id } => {
                PortError::internal(format!("{}/{} is not versioned", collection, id))
            }
            StoreError::Serialization(msg) => PortError::internal(msg),
            StoreError::ConnectionFailed(msg) => PortError::connection(msg),
        }
    }
}
