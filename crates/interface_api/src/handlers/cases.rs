//! Case handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{ActorContext, CaseId, Money};
use domain_case::Case;

use crate::dto::cases::{
    AttachmentView, CaseResponse, OpenCaseRequest, TimelineEventResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Opens a new case
pub async fn open_case(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<OpenCaseRequest>,
) -> Result<(StatusCode, Json<CaseResponse>), ApiError> {
    request.validate()?;

    let case = state
        .intake
        .open_case(
            actor,
            domain_engagement::intake::OpenCaseRequest {
                title: request.title,
                case_type: request.case_type,
                client_role: request.client_role,
                budget: request.budget.map(Money::from),
                attachments: request.attachments,
            },
        )
        .await?;

    let response = case_response(&state, case).await;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Gets a case by ID
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<CaseId>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = state.cases.get_case(id, None).await?;
    Ok(Json(case_response(&state, case).await))
}

/// Lists the caller's own cases, newest first
pub async fn list_cases(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<Vec<CaseResponse>>, ApiError> {
    let cases = state.cases.list_cases_by_owner(actor.actor_id, None).await?;

    let mut responses = Vec::with_capacity(cases.len());
    for case in cases {
        responses.push(case_response(&state, case).await);
    }
    Ok(Json(responses))
}

/// Gets a case's audit timeline, oldest first
pub async fn get_timeline(
    State(state): State<AppState>,
    Path(id): Path<CaseId>,
) -> Result<Json<Vec<TimelineEventResponse>>, ApiError> {
    // Surfaces NotFound for unknown cases instead of an empty timeline
    state.cases.get_case(id, None).await?;

    let events = state.recorder.list_timeline(id).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// Marks an in-progress case as filed
pub async fn file_case(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<CaseId>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = state.assignment.file_case(actor, id).await?;
    Ok(Json(case_response(&state, case).await))
}

/// Closes a case
pub async fn close_case(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<CaseId>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = state.assignment.close_case(actor, id).await?;
    Ok(Json(case_response(&state, case).await))
}

/// Builds a case response with attachments resolved through the blob
/// store; attachments it no longer knows degrade to id-only entries
async fn case_response(state: &AppState, case: Case) -> CaseResponse {
    let mut attachments = Vec::with_capacity(case.attachments.len());
    for id in &case.attachments {
        let view = match state.blobs.resolve_attachment(*id, None).await {
            Ok(Some(info)) => AttachmentView::resolved(info),
            Ok(None) => AttachmentView::unresolved(*id),
            Err(e) => {
                tracing::warn!(attachment_id = %id, error = %e, "attachment lookup failed");
                AttachmentView::unresolved(*id)
            }
        };
        attachments.push(view);
    }
    CaseResponse::from_case(case, attachments)
}
