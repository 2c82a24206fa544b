//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_case::CaseError;
use domain_engagement::EngagementError;
use domain_notification::NotificationError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngagementError> for ApiError {
    fn from(err: EngagementError) -> Self {
        match err {
            EngagementError::NotFound(msg) => ApiError::NotFound(msg),
            EngagementError::Validation(msg) => ApiError::Validation(msg),
            EngagementError::Unauthorized(msg) => ApiError::Forbidden(msg),
            EngagementError::Case(e) => e.into(),
            EngagementError::Persistence(e) => ApiError::Internal(e.to_string()),
            // CaseNotOpen, DuplicateApplication, AlreadyAssigned,
            // ChannelLocked, Contention
            conflict => ApiError::Conflict(conflict.to_string()),
        }
    }
}

impl From<CaseError> for ApiError {
    fn from(err: CaseError) -> Self {
        match err {
            CaseError::NotFound(msg) => ApiError::NotFound(msg),
            CaseError::Validation(msg) => ApiError::Validation(msg),
            CaseError::Unauthorized(msg) => ApiError::Forbidden(msg),
            CaseError::Persistence(e) => ApiError::Internal(e.to_string()),
            transition @ CaseError::InvalidStatusTransition { .. } => {
                ApiError::Conflict(transition.to_string())
            }
        }
    }
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::NotFound(msg) => ApiError::NotFound(msg),
            NotificationError::Persistence(e) => ApiError::Internal(e.to_string()),
            contention @ NotificationError::Contention { .. } => {
                ApiError::Conflict(contention.to_string())
            }
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match &err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { .. } => ApiError::Validation(err.to_string()),
            PortError::Conflict { .. } | PortError::VersionConflict { .. } => {
                ApiError::Conflict(err.to_string())
            }
            PortError::Unauthorized { .. } => ApiError::Forbidden(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
