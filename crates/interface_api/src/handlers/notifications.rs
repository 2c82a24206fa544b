//! Notification handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use core_kernel::{ActorContext, NotificationId};

use crate::dto::notifications::{InboxResponse, NotificationResponse};
use crate::error::ApiError;
use crate::AppState;

/// Lists the caller's notifications, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<InboxResponse>, ApiError> {
    let notifications = state.notifications.list_notifications(actor.actor_id).await?;
    let unread_count = state.notifications.unread_count(actor.actor_id).await?;

    Ok(Json(InboxResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
        unread_count,
    }))
}

/// Marks one of the caller's notifications read
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<NotificationId>,
) -> Result<Json<InboxResponse>, ApiError> {
    let inbox = state.notifications.mark_read(actor.actor_id, id).await?;

    Ok(Json(InboxResponse {
        notifications: inbox
            .newest_first()
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
        unread_count: inbox.unread_count,
    }))
}
