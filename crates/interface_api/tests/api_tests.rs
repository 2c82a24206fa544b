//! End-to-end API tests over the in-memory store

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use core_kernel::{ActorRole, PartyId};
use domain_engagement::LawyerProfile;
use infra_store::{MemoryStore, StoreProfileDirectory};
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::{build_state, create_router};

const JWT_SECRET: &str = "test-secret";

struct TestApp {
    server: TestServer,
    profiles: StoreProfileDirectory,
}

fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let config = ApiConfig {
        jwt_secret: JWT_SECRET.to_string(),
        ..ApiConfig::default()
    };

    let profiles = StoreProfileDirectory::new(store.clone());
    let state = build_state(store, config);
    let server = TestServer::new(create_router(state)).unwrap();

    TestApp { server, profiles }
}

fn bearer(party_id: PartyId, role: ActorRole) -> String {
    let token = create_token(party_id, role, JWT_SECRET, 600).unwrap();
    format!("Bearer {}", token)
}

async fn open_case(app: &TestApp, client: PartyId) -> String {
    let response = app
        .server
        .post("/api/v1/cases")
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .json(&json!({
            "title": "Eviction defense",
            "case_type": "property",
            "client_role": "tenant",
            "budget": {"amount": "1500.00", "currency": "USD"},
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

async fn apply(app: &TestApp, case_id: &str, lawyer: PartyId) {
    let response = app
        .server
        .post(&format!("/api/v1/cases/{}/applications", case_id))
        .add_header("Authorization", bearer(lawyer, ActorRole::Lawyer))
        .json(&json!({"cover_letter": "I practice housing law"}))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app();

    let health = app.server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "healthy");

    let ready = app.server.get("/health/ready").await;
    ready.assert_status_ok();
}

#[tokio::test]
async fn test_api_requires_token() {
    let app = test_app();

    let response = app.server.get("/api/v1/cases").await;
    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);

    let garbage = app
        .server
        .get("/api/v1/cases")
        .add_header("Authorization", "Bearer not-a-token")
        .await;
    garbage.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_open_case_and_read_back() {
    let app = test_app();
    let client = PartyId::new();

    let case_id = open_case(&app, client).await;

    let response = app
        .server
        .get(&format!("/api/v1/cases/{}", case_id))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["title"], "Eviction defense");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["budget"]["currency"], "USD");

    let listed = app
        .server
        .get("/api/v1/cases")
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    assert_eq!(listed.json::<Value>().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_lawyers_cannot_open_cases() {
    let app = test_app();

    let response = app
        .server
        .post("/api/v1/cases")
        .add_header("Authorization", bearer(PartyId::new(), ActorRole::Lawyer))
        .json(&json!({
            "title": "t",
            "case_type": "civil",
            "client_role": "plaintiff",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_title_is_unprocessable() {
    let app = test_app();

    let response = app
        .server
        .post("/api/v1/cases")
        .add_header("Authorization", bearer(PartyId::new(), ActorRole::Client))
        .json(&json!({
            "title": "",
            "case_type": "civil",
            "client_role": "plaintiff",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_case_is_not_found() {
    let app = test_app();

    let response = app
        .server
        .get(&format!("/api/v1/cases/{}", core_kernel::CaseId::new()))
        .add_header("Authorization", bearer(PartyId::new(), ActorRole::Client))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_application_conflicts() {
    let app = test_app();
    let case_id = open_case(&app, PartyId::new()).await;
    let lawyer = PartyId::new();

    apply(&app, &case_id, lawyer).await;

    let second = app
        .server
        .post(&format!("/api/v1/cases/{}/applications", case_id))
        .add_header("Authorization", bearer(lawyer, ActorRole::Lawyer))
        .json(&json!({"cover_letter": "again"}))
        .await;
    second.assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_application_listing_joins_profiles() {
    let app = test_app();
    let case_id = open_case(&app, PartyId::new()).await;
    let lawyer = PartyId::new();

    app.profiles
        .put_profile(&LawyerProfile {
            party_id: lawyer,
            display_name: "Sam Ortiz".to_string(),
            firm: Some("Ortiz Legal".to_string()),
            practice_areas: vec!["property".to_string()],
        })
        .await
        .unwrap();
    apply(&app, &case_id, lawyer).await;

    let response = app
        .server
        .get(&format!("/api/v1/cases/{}/applications", case_id))
        .add_header("Authorization", bearer(lawyer, ActorRole::Lawyer))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body[0]["lawyer_name"], "Sam Ortiz");
    assert_eq!(body[0]["status"], "pending");
}

#[tokio::test]
async fn test_accept_flow_unlocks_messaging_and_notifies() {
    let app = test_app();
    let client = PartyId::new();
    let chosen = PartyId::new();
    let other = PartyId::new();

    let case_id = open_case(&app, client).await;
    apply(&app, &case_id, chosen).await;
    apply(&app, &case_id, other).await;

    // Channel is locked before assignment
    let early = app
        .server
        .post(&format!("/api/v1/cases/{}/messages", case_id))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .json(&json!({"text": "anyone there?"}))
        .await;
    early.assert_status(axum::http::StatusCode::CONFLICT);

    // Only the owner may accept
    let not_owner = app
        .server
        .post(&format!(
            "/api/v1/cases/{}/applications/{}/accept",
            case_id, chosen
        ))
        .add_header("Authorization", bearer(other, ActorRole::Client))
        .await;
    not_owner.assert_status(axum::http::StatusCode::FORBIDDEN);

    let accepted = app
        .server
        .post(&format!(
            "/api/v1/cases/{}/applications/{}/accept",
            case_id, chosen
        ))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    accepted.assert_status_ok();

    // The other application was superseded
    let applications = accepted.json::<Value>();
    let statuses: Vec<&str> = applications
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["status"].as_str().unwrap())
        .collect();
    assert!(statuses.contains(&"accepted"));
    assert!(statuses.contains(&"rejected"));

    // A second accept conflicts
    let again = app
        .server
        .post(&format!(
            "/api/v1/cases/{}/applications/{}/accept",
            case_id, other
        ))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    again.assert_status(axum::http::StatusCode::CONFLICT);

    // The channel is now open to both participants
    let sent = app
        .server
        .post(&format!("/api/v1/cases/{}/messages", case_id))
        .add_header("Authorization", bearer(chosen, ActorRole::Lawyer))
        .json(&json!({"text": "Reviewing your lease now"}))
        .await;
    sent.assert_status(axum::http::StatusCode::CREATED);

    let listed = app
        .server
        .get(&format!("/api/v1/cases/{}/messages", case_id))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    listed.assert_status_ok();
    assert_eq!(listed.json::<Value>().as_array().unwrap().len(), 1);

    // An outsider cannot read the channel
    let outsider = app
        .server
        .get(&format!("/api/v1/cases/{}/messages", case_id))
        .add_header("Authorization", bearer(PartyId::new(), ActorRole::Lawyer))
        .await;
    outsider.assert_status(axum::http::StatusCode::FORBIDDEN);

    // The chosen lawyer was notified of the assignment
    let inbox = app
        .server
        .get("/api/v1/notifications")
        .add_header("Authorization", bearer(chosen, ActorRole::Lawyer))
        .await;
    inbox.assert_status_ok();
    let inbox = inbox.json::<Value>();
    let kinds: Vec<&str> = inbox["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"lawyer_assigned"));
}

#[tokio::test]
async fn test_timeline_records_the_whole_story() {
    let app = test_app();
    let client = PartyId::new();
    let lawyer = PartyId::new();

    let case_id = open_case(&app, client).await;
    apply(&app, &case_id, lawyer).await;
    app.server
        .post(&format!(
            "/api/v1/cases/{}/applications/{}/accept",
            case_id, lawyer
        ))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await
        .assert_status_ok();
    app.server
        .post(&format!("/api/v1/cases/{}/close", case_id))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await
        .assert_status_ok();

    let timeline = app
        .server
        .get(&format!("/api/v1/cases/{}/timeline", case_id))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    timeline.assert_status_ok();

    let actions: Vec<String> = timeline
        .json::<Value>()
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        actions,
        vec![
            "case_opened",
            "application_submitted",
            "lawyer_assigned",
            "case_closed",
        ]
    );
}

#[tokio::test]
async fn test_mark_notification_read() {
    let app = test_app();
    let client = PartyId::new();
    let case_id = open_case(&app, client).await;
    apply(&app, &case_id, PartyId::new()).await;

    let inbox = app
        .server
        .get("/api/v1/notifications")
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await
        .json::<Value>();
    assert_eq!(inbox["unread_count"], 1);
    let notification_id = inbox["notifications"][0]["id"].as_str().unwrap().to_string();

    let marked = app
        .server
        .post(&format!("/api/v1/notifications/{}/read", notification_id))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    marked.assert_status_ok();
    assert_eq!(marked.json::<Value>()["unread_count"], 0);

    // Marking again is idempotent
    let again = app
        .server
        .post(&format!("/api/v1/notifications/{}/read", notification_id))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    again.assert_status_ok();
    assert_eq!(again.json::<Value>()["unread_count"], 0);

    // Marking an unknown notification is not found
    let unknown = app
        .server
        .post(&format!(
            "/api/v1/notifications/{}/read",
            core_kernel::NotificationId::new()
        ))
        .add_header("Authorization", bearer(client, ActorRole::Client))
        .await;
    unknown.assert_status(axum::http::StatusCode::NOT_FOUND);
}
