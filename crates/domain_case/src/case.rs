//! Case aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AttachmentId, CaseId, Money, PartyId};

use crate::error::CaseError;

/// Case status
///
/// Status is mutated only by the assignment process: accepting an
/// application moves a case to `InProgress`, and only the owner can close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Open for lawyer applications
    Pending,
    /// A lawyer has been assigned and is working the case
    InProgress,
    /// Filed with the court
    Filed,
    /// Closed by the owner
    Closed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::InProgress => "in_progress",
            CaseStatus::Filed => "filed",
            CaseStatus::Closed => "closed",
        }
    }
}

/// Area of law a case falls under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    Family,
    Criminal,
    Corporate,
    Immigration,
    Property,
    Employment,
    Civil,
    Other,
}

/// A legal matter posted by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    /// Unique identifier
    pub id: CaseId,
    /// The client who owns this case
    pub owner_id: PartyId,
    /// Short title
    pub title: String,
    /// Area of law
    pub case_type: CaseType,
    /// The client's position in the matter (e.g. "plaintiff", "defendant")
    pub client_role: String,
    /// Budget the client is willing to spend, if stated
    pub budget: Option<Money>,
    /// Status
    pub status: CaseStatus,
    /// Attachment ids resolved through the blob-store collaborator
    #[serde(default)]
    pub attachments: Vec<AttachmentId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Creates a new pending case
    pub fn open(
        owner_id: PartyId,
        title: impl Into<String>,
        case_type: CaseType,
        client_role: impl Into<String>,
        budget: Option<Money>,
    ) -> Result<Self, CaseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CaseError::Validation("title is required".to_string()));
        }
        if let Some(budget) = budget {
            budget
                .validate_budget()
                .map_err(|e| CaseError::Validation(e.to_string()))?;
        }

        let now = Utc::now();
        Ok(Self {
            id: CaseId::new_v7(),
            owner_id,
            title,
            case_type,
            client_role: client_role.into(),
            budget,
            status: CaseStatus::Pending,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Attaches document references at creation time
    pub fn with_attachments(mut self, attachments: Vec<AttachmentId>) -> Self {
        self.attachments = attachments;
        self
    }

    /// True while the case is open for lawyer applications
    pub fn accepts_applications(&self) -> bool {
        self.status == CaseStatus::Pending
    }

    /// True if the given party owns this case
    pub fn is_owned_by(&self, party_id: PartyId) -> bool {
        self.owner_id == party_id
    }

    /// Updates the status
    pub fn update_status(&mut self, status: CaseStatus) -> Result<(), CaseError> {
        if !self.can_transition_to(status) {
            return Err(CaseError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: status.as_str().to_string(),
            });
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Checks if transition is valid
    fn can_transition_to(&self, target: CaseStatus) -> bool {
        use CaseStatus::*;
        matches!(
            (self.status, target),
            (Pending, InProgress) | (InProgress, Filed) | (InProgress, Closed) | (Filed, Closed)
        )
    }
}
