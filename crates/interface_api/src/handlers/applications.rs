//! Application handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{ActorContext, CaseId, PartyId};

use crate::dto::engagement::{ApplicationResponse, SubmitApplicationRequest};
use crate::error::ApiError;
use crate::AppState;

/// Submits a lawyer's application to a case
pub async fn submit_application(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(case_id): Path<CaseId>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    request.validate()?;

    let application = state
        .workflow
        .submit_application(actor, case_id, &request.cover_letter)
        .await?;

    let lawyer = state.profiles.get_profile(application.lawyer_id, None).await?;
    let view = domain_engagement::ApplicationView { application, lawyer };
    Ok((StatusCode::CREATED, Json(view.into())))
}

/// Lists a case's applications, oldest first
pub async fn list_applications(
    State(state): State<AppState>,
    Path(case_id): Path<CaseId>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let views = state.workflow.list_applications(case_id).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

/// Accepts one application, assigning its lawyer
pub async fn accept_application(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path((case_id, lawyer_id)): Path<(CaseId, PartyId)>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    state
        .assignment
        .accept_application(actor, case_id, lawyer_id)
        .await?;

    let views = state.workflow.list_applications(case_id).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

/// Rejects one pending application
pub async fn reject_application(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path((case_id, lawyer_id)): Path<(CaseId, PartyId)>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    state
        .assignment
        .reject_application(actor, case_id, lawyer_id)
        .await?;

    let views = state.workflow.list_applications(case_id).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}
