//! Lawyer applications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ApplicationId, PartyId};

/// Application status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Waiting for the client's decision
    Pending,
    /// The client accepted this application
    Accepted,
    /// Rejected by the client, or superseded when another lawyer was accepted
    Rejected,
}

/// A lawyer's submission of interest in a case
///
/// Immutable except for its status. A lawyer counts as "interested" in a
/// case exactly while their application is pending; there is no separate
/// interest set to keep in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier
    pub id: ApplicationId,
    /// The applying lawyer
    pub lawyer_id: PartyId,
    /// Why this lawyer wants the case
    pub cover_letter: String,
    /// When the application was submitted
    pub submitted_at: DateTime<Utc>,
    /// Status
    pub status: ApplicationStatus,
}

impl Application {
    /// Creates a new pending application
    pub fn submit(lawyer_id: PartyId, cover_letter: impl Into<String>) -> Self {
        Self {
            id: ApplicationId::new_v7(),
            lawyer_id,
            cover_letter: cover_letter.into(),
            submitted_at: Utc::now(),
            status: ApplicationStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }
}
