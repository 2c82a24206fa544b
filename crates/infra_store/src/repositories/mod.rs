//! Repository implementations
//!
//! Each repository implements one domain port over any `DocumentStore`,
//! owning the mapping between domain types and stored JSON documents.

mod case;
mod engagement;
mod inbox;

pub use case::CaseRepository;
pub use engagement::EngagementRepository;
pub use inbox::InboxRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::Fields;

/// Serializes a domain value into a document field map
pub(crate) fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Serialization(
            "domain value did not serialize to an object".to_string(),
        )),
    }
}

/// Deserializes a stored document back into a domain value
pub(crate) fn from_document<T: DeserializeOwned>(doc: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(doc)?)
}
