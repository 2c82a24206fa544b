//! HTTP API Layer
//!
//! This crate provides the REST API for the legal match system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for cases, applications, messages,
//!   notifications
//! - **Middleware**: Authentication, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use interface_api::{build_state, create_router, config::ApiConfig};
//! use infra_store::MemoryStore;
//!
//! let state = build_state(Arc::new(MemoryStore::new()), ApiConfig::default());
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_case::{BlobStorePort, CasePort};
use domain_engagement::{
    ApplicationWorkflow, AssignmentManager, CaseIntake, CaseLockRegistry, MessagingChannel,
    ProfileDirectoryPort, TimelineRecorder,
};
use domain_notification::{NotificationService, Notifier};
use infra_store::{
    CaseRepository, DocumentStore, EngagementRepository, InboxRepository, StoreBlobStore,
    StoreProfileDirectory,
};

use crate::config::ApiConfig;
use crate::handlers::{applications, cases, health, messages, notifications};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<CaseIntake>,
    pub workflow: Arc<ApplicationWorkflow>,
    pub assignment: Arc<AssignmentManager>,
    pub messaging: Arc<MessagingChannel>,
    pub recorder: Arc<TimelineRecorder>,
    pub notifications: Arc<NotificationService>,
    pub cases: Arc<dyn CasePort>,
    pub profiles: Arc<dyn ProfileDirectoryPort>,
    pub blobs: Arc<dyn BlobStorePort>,
    pub store: Arc<dyn DocumentStore>,
    pub config: ApiConfig,
}

/// Wires repositories and services over a document store
pub fn build_state(store: Arc<dyn DocumentStore>, config: ApiConfig) -> AppState {
    let cases: Arc<dyn CasePort> = Arc::new(CaseRepository::new(store.clone()));
    let engagements = Arc::new(EngagementRepository::new(store.clone()));
    let inboxes = Arc::new(InboxRepository::new(store.clone()));
    let profiles: Arc<dyn ProfileDirectoryPort> =
        Arc::new(StoreProfileDirectory::new(store.clone()));
    let blobs: Arc<dyn BlobStorePort> = Arc::new(StoreBlobStore::new(store.clone()));

    let recorder = Arc::new(TimelineRecorder::new(engagements.clone()));
    let notifications = Arc::new(NotificationService::new(inboxes));
    let notifier = Arc::new(Notifier::new(notifications.clone()));
    let locks = Arc::new(CaseLockRegistry::new());

    let intake = Arc::new(CaseIntake::new(
        cases.clone(),
        engagements.clone(),
        recorder.clone(),
    ));
    let workflow = Arc::new(ApplicationWorkflow::new(
        cases.clone(),
        engagements.clone(),
        profiles.clone(),
        recorder.clone(),
        notifier.clone(),
        locks.clone(),
    ));
    let assignment = Arc::new(AssignmentManager::new(
        cases.clone(),
        engagements.clone(),
        recorder.clone(),
        notifier,
        locks,
    ));
    let messaging = Arc::new(MessagingChannel::new(cases.clone(), engagements));

    AppState {
        intake,
        workflow,
        assignment,
        messaging,
        recorder,
        notifications,
        cases,
        profiles,
        blobs,
        store,
        config,
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Case routes
    let case_routes = Router::new()
        .route("/", post(cases::open_case))
        .route("/", get(cases::list_cases))
        .route("/:id", get(cases::get_case))
        .route("/:id/timeline", get(cases::get_timeline))
        .route("/:id/file", post(cases::file_case))
        .route("/:id/close", post(cases::close_case))
        .route("/:id/applications", post(applications::submit_application))
        .route("/:id/applications", get(applications::list_applications))
        .route(
            "/:id/applications/:lawyer_id/accept",
            post(applications::accept_application),
        )
        .route(
            "/:id/applications/:lawyer_id/reject",
            post(applications::reject_application),
        )
        .route("/:id/messages", post(messages::send_message))
        .route("/:id/messages", get(messages::list_messages));

    // Notification routes
    let notification_routes = Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/:id/read", post(notifications::mark_read));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/cases", case_routes)
        .nest("/notifications", notification_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
