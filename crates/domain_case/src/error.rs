//! Case domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the case domain
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("Case not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Persistence failure: {0}")]
    Persistence(#[source] PortError),
}

impl From<PortError> for CaseError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { ref id, .. } => CaseError::NotFound(id.clone()),
            PortError::Validation { message } => CaseError::Validation(message),
            PortError::Unauthorized { message } => CaseError::Unauthorized(message),
            other => CaseError::Persistence(other),
        }
    }
}
