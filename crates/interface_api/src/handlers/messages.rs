//! Message handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{ActorContext, CaseId};

use crate::dto::engagement::{MessageResponse, SendMessageRequest};
use crate::error::ApiError;
use crate::AppState;

/// Sends a message on a case's channel
pub async fn send_message(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(case_id): Path<CaseId>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    request.validate()?;

    let message = state
        .messaging
        .send_message(actor, case_id, &request.text)
        .await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

/// Lists a case's messages, oldest first
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(case_id): Path<CaseId>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let messages = state.messaging.list_messages(actor, case_id).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
