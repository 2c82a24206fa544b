//! Engagement domain errors
//!
//! Conflict-class errors (`DuplicateApplication`, `AlreadyAssigned`,
//! `CaseNotOpen`, `ChannelLocked`) surface directly to the caller and
//! always leave every record unchanged.

use core_kernel::PortError;
use domain_case::CaseError;
use thiserror::Error;

/// Errors that can occur in the engagement domain
#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Case {case_id} is not open for applications")]
    CaseNotOpen { case_id: String },

    #[error("Lawyer {lawyer_id} has already applied to case {case_id}")]
    DuplicateApplication { case_id: String, lawyer_id: String },

    #[error("Case {case_id} already has an assigned lawyer")]
    AlreadyAssigned { case_id: String },

    #[error("Messaging channel for case {case_id} is locked until a lawyer is assigned")]
    ChannelLocked { case_id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Engagement write contention for case {case_id} after {attempts} attempts")]
    Contention { case_id: String, attempts: u32 },

    #[error(transparent)]
    Case(#[from] CaseError),

    #[error("Persistence failure: {0}")]
    Persistence(#[source] PortError),
}

impl From<PortError> for EngagementError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { ref id, .. } => EngagementError::NotFound(id.clone()),
            PortError::Validation { message } => EngagementError::Validation(message),
            PortError::Unauthorized { message } => EngagementError::Unauthorized(message),
            other => EngagementError::Persistence(other),
        }
    }
}

impl EngagementError {
    /// True for the conflict class of errors (blocked transitions)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            EngagementError::CaseNotOpen { .. }
                | EngagementError::DuplicateApplication { .. }
                | EngagementError::AlreadyAssigned { .. }
                | EngagementError::ChannelLocked { .. }
        )
    }
}
