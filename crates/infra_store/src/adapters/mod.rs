//! External-collaborator adapters
//!
//! The profile directory and the blob store are separate systems in
//! production. These adapters serve both from document collections so a
//! single store backs the whole deployment.

mod blobs;
mod profiles;

pub use blobs::StoreBlobStore;
pub use profiles::StoreProfileDirectory;
