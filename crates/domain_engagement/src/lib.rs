//! Engagement Domain
//!
//! This crate implements the engagement record attached 1:1 to every case:
//! lawyer applications, the single-assignment decision, the append-only
//! audit timeline, and the assignment-gated messaging channel.
//!
//! # Engagement Flow
//!
//! ```text
//! case opened -> lawyers apply -> client accepts one -> messaging unlocks
//!                                  (others superseded)
//! ```
//!
//! The underlying store offers no cross-document transactions, so every
//! mutation of the engagement record runs under a per-case lock
//! ([`locks::CaseLockRegistry`]) and is written with a version-conditional
//! update. Within one process the lock serializes writers; across
//! processes the version check rejects the loser of a race.

pub mod application;
pub mod assignment;
pub mod engagement;
pub mod error;
pub mod intake;
pub mod locks;
pub mod message;
pub mod messaging;
pub mod ports;
pub mod recorder;
pub mod timeline;
pub mod workflow;

pub use application::{Application, ApplicationStatus};
pub use assignment::AssignmentManager;
pub use engagement::EngagementRecord;
pub use error::EngagementError;
pub use intake::CaseIntake;
pub use locks::CaseLockRegistry;
pub use message::Message;
pub use messaging::MessagingChannel;
pub use ports::{EngagementStorePort, LawyerProfile, ProfileDirectoryPort};
pub use recorder::TimelineRecorder;
pub use timeline::{TimelineAction, TimelineEvent};
pub use workflow::{ApplicationView, ApplicationWorkflow};
