//! Infrastructure Store Layer
//!
//! This crate provides the persistence infrastructure for the legal match
//! system: a transactionless JSON document store and the repository
//! adapters that implement the domain ports over it.
//!
//! # Architecture
//!
//! The store offers single-document atomicity only. Documents that see
//! concurrent read-modify-write cycles (engagement records, notification
//! inboxes) carry a `version` field and are written through
//! `update_if_version`; everything else is plain creates and merges.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_store::{MemoryStore, CaseRepository};
//!
//! let store = Arc::new(MemoryStore::new());
//! let cases = CaseRepository::new(store);
//! ```

pub mod adapters;
pub mod error;
pub mod repositories;
pub mod store;

pub use adapters::{StoreBlobStore, StoreProfileDirectory};
pub use error::StoreError;
pub use repositories::{CaseRepository, EngagementRepository, InboxRepository};
pub use store::{DocumentStore, Fields, MemoryStore};
