//! Case Domain
//!
//! This crate implements the case record: a legal matter posted by a client,
//! with a status lifecycle driven exclusively by the assignment process.
//!
//! # Case Lifecycle
//!
//! ```text
//! Pending -> InProgress -> Filed -> Closed
//!                       \-> Closed
//! ```
//!
//! A case is `Pending` while lawyers may still apply. Accepting an
//! application moves it to `InProgress` and locks further applications out.

pub mod case;
pub mod error;
pub mod ports;

pub use case::{Case, CaseStatus, CaseType};
pub use error::CaseError;
pub use ports::{AttachmentInfo, BlobStorePort, CasePort};
