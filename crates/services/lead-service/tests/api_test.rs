//! Integration tests for the lead endpoints.
//!
//! These tests drive the full router with `tower::ServiceExt::oneshot`
//! against an in-memory repository, without a database connection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{AppError, AppResult};
use domain::{Lead, LeadSubmission};
use lead_service_lib::config::LeadServiceConfig;
use lead_service_lib::repository::LeadRepository;
use lead_service_lib::routes::create_router;
use lead_service_lib::service::LeadManager;
use lead_service_lib::state::AppState;

// =============================================================================
// In-memory store for testing
// =============================================================================

/// Append-only in-memory repository; ids and timestamps strictly increase.
#[derive(Default)]
struct InMemoryLeadRepository {
    rows: Mutex<Vec<Lead>>,
    list_calls: AtomicUsize,
}

impl InMemoryLeadRepository {
    fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn create(&self, submission: LeadSubmission) -> AppResult<Lead> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        let created_at = (Utc::now() + Duration::seconds(id as i64)).fixed_offset();

        let lead = Lead {
            id,
            services: Some(submission.services_or_default()),
            name: submission.name,
            phone: submission.phone,
            city: submission.city,
            address: submission.address,
            object_type: submission.object_type,
            object_type_other: submission.object_type_other,
            area: submission.area,
            rooms: submission.rooms,
            start_time: submission.start_time,
            deadline: submission.deadline,
            budget: submission.budget,
            materials_interest: submission.materials_interest,
            consultation_type: submission.consultation_type,
            created_at: Some(created_at),
        };
        rows.push(lead.clone());
        Ok(lead)
    }

    async fn list_recent(&self, limit: u64) -> AppResult<Vec<Lead>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Repository whose store is always unreachable.
struct UnreachableLeadRepository;

#[async_trait]
impl LeadRepository for UnreachableLeadRepository {
    async fn create(&self, _submission: LeadSubmission) -> AppResult<Lead> {
        Err(AppError::internal("connection refused"))
    }

    async fn list_recent(&self, _limit: u64) -> AppResult<Vec<Lead>> {
        Err(AppError::internal("connection refused"))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::internal("connection refused"))
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app_with(repo: Arc<dyn LeadRepository>) -> Router {
    let service = Arc::new(LeadManager::new(repo));
    create_router(AppState::new(service, LeadServiceConfig::default()))
}

fn test_app() -> (Router, Arc<InMemoryLeadRepository>) {
    let repo = Arc::new(InMemoryLeadRepository::default());
    (app_with(repo.clone()), repo)
}

async fn send(app: &Router, method: Method, uri: &str, body: Body) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_of(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn submit(app: &Router, payload: Value) -> (StatusCode, Value) {
    let response = send(app, Method::POST, "/submit", Body::from(payload.to_string())).await;
    let status = response.status();
    (status, json_of(response).await)
}

async fn list(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = send(app, Method::GET, uri, Body::empty()).await;
    let status = response.status();
    (status, json_of(response).await)
}

fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

// =============================================================================
// Submit
// =============================================================================

#[tokio::test]
async fn test_submit_lead_success() {
    let (app, repo) = test_app();

    let (status, body) = submit(
        &app,
        json!({ "name": "A", "phone": "123", "services": ["wiring"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["leadId"].as_i64().unwrap() > 0);
    let created_at = body["createdAt"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(created_at).is_ok());
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn test_submit_response_headers() {
    let (app, _) = test_app();

    let response = send(&app, Method::POST, "/submit", Body::from("{}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), Some("application/json"));
    assert_eq!(header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
}

#[tokio::test]
async fn test_submit_without_content_type() {
    let (app, repo) = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/submit")
                .body(Body::from(r#"{"name":"B"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn test_submit_same_payload_twice_creates_two_leads() {
    let (app, repo) = test_app();
    let payload = json!({ "name": "A", "phone": "123" });

    let (_, first) = submit(&app, payload.clone()).await;
    let (_, second) = submit(&app, payload).await;

    assert_ne!(first["leadId"], second["leadId"]);
    assert_eq!(repo.count(), 2);
}

#[tokio::test]
async fn test_submit_malformed_json() {
    let (app, repo) = test_app();

    let response = send(&app, Method::POST, "/submit", Body::from("{\"name\": ")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
    let body = json_of(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_submit_non_object_body() {
    let (app, repo) = test_app();

    let (status, body) = submit(&app, json!(["name", "A"])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_submit_store_failure() {
    let app = app_with(Arc::new(UnreachableLeadRepository));

    let (status, body) = submit(&app, json!({ "name": "A" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "connection refused" }));
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_empty() {
    let (app, _) = test_app();

    let (status, body) = list(&app, "/list").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "leads": [], "total": 0 }));
}

#[tokio::test]
async fn test_submitted_lead_is_listed() {
    let (app, _) = test_app();
    let (_, submitted) = submit(
        &app,
        json!({
            "name": "A",
            "phone": "123",
            "city": "Москва",
            "objectType": "Квартира",
            "area": 75,
            "rooms": "3",
            "services": ["wiring", "plumbing"],
            "budget": "1-2 млн. руб.",
            "consultationType": "Онлайн"
        }),
    )
    .await;

    let (status, body) = list(&app, "/list?limit=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    let lead = &body["leads"][0];
    assert_eq!(lead["id"], submitted["leadId"]);
    assert_eq!(lead["name"], "A");
    assert_eq!(lead["phone"], "123");
    assert_eq!(lead["city"], "Москва");
    assert_eq!(lead["object_type"], "Квартира");
    assert_eq!(lead["area"], "75");
    assert_eq!(lead["rooms"], "3");
    assert_eq!(lead["services"], json!(["wiring", "plumbing"]));
    assert_eq!(lead["budget"], "1-2 млн. руб.");
    assert_eq!(lead["consultation_type"], "Онлайн");
    assert!(lead["deadline"].is_null());

    let listed: DateTime<FixedOffset> =
        DateTime::parse_from_rfc3339(lead["created_at"].as_str().unwrap()).unwrap();
    let returned: DateTime<FixedOffset> =
        DateTime::parse_from_rfc3339(submitted["createdAt"].as_str().unwrap()).unwrap();
    assert_eq!(listed, returned);
}

#[tokio::test]
async fn test_list_newest_first_with_limit() {
    let (app, _) = test_app();
    submit(&app, json!({ "name": "first" })).await;
    let (_, second) = submit(&app, json!({ "name": "second" })).await;

    let (status, body) = list(&app, "/list?limit=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["leads"][0]["name"], "second");
    assert_eq!(body["leads"][0]["id"], second["leadId"]);
}

#[tokio::test]
async fn test_list_ordered_by_created_at_desc() {
    let (app, _) = test_app();
    for name in ["a", "b", "c"] {
        submit(&app, json!({ "name": name })).await;
    }

    let (_, body) = list(&app, "/list").await;

    let names: Vec<&str> = body["leads"]
        .as_array()
        .unwrap()
        .iter()
        .map(|lead| lead["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["c", "b", "a"]);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_list_invalid_limit() {
    let (app, _) = test_app();

    let (status, body) = list(&app, "/list?limit=abc").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_list_limit_above_store_range() {
    let (app, repo) = test_app();

    let (status, body) = list(&app, "/list?limit=9223372036854775808").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("9223372036854775808"));
    assert_eq!(repo.list_calls(), 0);
}

#[tokio::test]
async fn test_list_store_failure() {
    let app = app_with(Arc::new(UnreachableLeadRepository));

    let (status, body) = list(&app, "/list").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "connection refused");
}

// =============================================================================
// Methods & CORS
// =============================================================================

#[tokio::test]
async fn test_preflight_on_both_endpoints() {
    let (app, _) = test_app();

    for (uri, methods) in [("/submit", "POST, OPTIONS"), ("/list", "GET, OPTIONS")] {
        let response = send(&app, Method::OPTIONS, uri, Body::from("not even json")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
        assert_eq!(header_value(&response, header::ACCESS_CONTROL_ALLOW_METHODS), Some(methods));
        assert_eq!(
            header_value(&response, header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some("Content-Type")
        );
        assert_eq!(header_value(&response, header::ACCESS_CONTROL_MAX_AGE), Some("86400"));
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_preflight_does_not_touch_store() {
    let (app, repo) = test_app();

    send(&app, Method::OPTIONS, "/submit", Body::from(r#"{"name":"A"}"#)).await;

    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_wrong_method_not_allowed() {
    let (app, repo) = test_app();
    let cases = [
        (Method::GET, "/submit"),
        (Method::PUT, "/submit"),
        (Method::DELETE, "/submit"),
        (Method::POST, "/list"),
        (Method::PATCH, "/list"),
    ];

    for (method, uri) in cases {
        let response = send(&app, method, uri, Body::from("{}")).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
        assert_eq!(json_of(response).await, json!({ "error": "Method not allowed" }));
    }
    assert_eq!(repo.count(), 0);
    assert_eq!(repo.list_calls(), 0);
}

#[tokio::test]
async fn test_head_on_list_not_allowed() {
    let (app, repo) = test_app();
    submit(&app, json!({ "name": "A" })).await;

    let response = send(&app, Method::HEAD, "/list", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
    assert_eq!(repo.list_calls(), 0);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_healthy() {
    let (app, _) = test_app();

    let response = send(&app, Method::GET, "/health", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_of(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "lead-service");
}

#[tokio::test]
async fn test_health_unhealthy() {
    let app = app_with(Arc::new(UnreachableLeadRepository));

    let response = send(&app, Method::GET, "/health", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_of(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["error"], "connection refused");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = test_app();

    let response = send(&app, Method::GET, "/api-docs/openapi.json", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_of(response).await;
    assert!(body["paths"]["/submit"].is_object());
    assert!(body["paths"]["/list"].is_object());
}
