//! Request middleware
//!
//! Authentication resolves the acting party before any handler runs; the
//! audit layer records who touched which case endpoint.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use core_kernel::ActorContext;

use crate::AppState;

/// Authentication middleware
///
/// Validates JWT tokens and stashes the resolved `ActorContext` in
/// request extensions for handlers to extract.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            warn!("Missing or invalid Authorization header");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    match crate::auth::validate_token(token, &state.config.jwt_secret)
        .and_then(|claims| claims.actor_context())
    {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!("Token validation failed: {:?}", e);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Audit logging middleware
///
/// Records every request with the acting party. Engagements are disputes
/// between real parties, so the trail of who viewed or moved a case
/// matters beyond debugging.
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let (party, role) = request
        .extensions()
        .get::<ActorContext>()
        .map(|a| (a.actor_id.to_string(), a.role.as_str()))
        .unwrap_or_else(|| ("anonymous".to_string(), "none"));

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        party = %party,
        role = %role,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "engagement api request"
    );

    response
}
