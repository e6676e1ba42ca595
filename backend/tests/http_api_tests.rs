//! REST API tests driven through the axum router with `oneshot`.
#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use practitioner_directory::db::repositories::LocalRepository;
use practitioner_directory::db::{services, PractitionerRepository};
use practitioner_directory::http::{create_router, AppState};

async fn seeded() -> (Router, LocalRepository) {
    let repo = LocalRepository::new();
    services::seed_practitioners(&repo, &services::sample_roster())
        .await
        .unwrap();
    let handle = Arc::new(repo.clone()) as Arc<dyn PractitionerRepository>;
    (create_router(AppState::new(handle)), repo)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn new_doctor(name: &str) -> Value {
    json!({
        "name": name,
        "specialty": "Pediatrics",
        "experience": 6,
        "qualification": "MBBS, DCH",
        "gender": "Other",
        "consultationFee": 550,
        "rating": 4.2,
        "availability": { "online": true, "clinic": true },
        "nextAvailableSlot": "2030-01-01T09:30:00Z",
    })
}

#[tokio::test]
async fn test_health_reports_connected_store() {
    let (app, _) = seeded().await;
    let (status, body) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_list_default_envelope() {
    let (app, _) = seeded().await;
    let (status, body) = send(app, get("/api/doctors")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(
        body["pagination"],
        json!({ "total": 10, "page": 1, "limit": 10, "totalPages": 1 })
    );
    let first = &body["data"][0];
    assert_eq!(first["rating"], 4.9);
    assert!(first.get("consultationFee").is_some());
    assert!(first.get("nextAvailableSlot").is_some());
}

#[tokio::test]
async fn test_list_with_filters_and_paging() {
    let (app, _) = seeded().await;
    let (status, body) = send(
        app,
        get("/api/doctors?availability=online&gender=Male&sortBy=experience&sortOrder=asc&limit=2&page=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Male roster by experience: 9, 14, 15, 18, 20
    let experience: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["experience"].as_u64().unwrap())
        .collect();
    assert_eq!(experience, vec![15, 18]);
    assert_eq!(body["pagination"]["total"], 5);
    assert_eq!(body["pagination"]["totalPages"], 3);
}

#[tokio::test]
async fn test_list_rejects_bad_parameters() {
    let cases = [
        ("/api/doctors?rating=7", "rating", "rating out of range"),
        ("/api/doctors?experience=-2", "experience", "experience must be non-negative"),
        ("/api/doctors?availability=phone", "availability", "invalid availability type"),
        ("/api/doctors?page=0", "page", "page must be a positive number"),
        ("/api/doctors?limit=101", "limit", "limit must be between 1-100"),
    ];
    for (uri, field, message) in cases {
        let (app, _) = seeded().await;
        let (status, body) = send(app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field"], field);
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn test_list_store_failure_is_503() {
    let (app, repo) = seeded().await;
    repo.set_healthy(false);
    let (status, body) = send(app, get("/api/doctors")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_create_then_fetch_by_slug() {
    let (app, _) = seeded().await;

    let (status, body) = send(
        app.clone(),
        post_json("/api/doctors", &new_doctor("Dr. Sam Iyer")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["slug"], "dr-sam-iyer");
    assert_eq!(body["data"]["availability"]["hospital"], false);
    assert!(body["data"]["id"].as_i64().unwrap() > 10);

    let (status, fetched) = send(app.clone(), get("/api/doctors/dr-sam-iyer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], body["data"]);

    let (_, listed) = send(app, get("/api/doctors?specialty=Pediatrics")).await;
    assert_eq!(listed["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_create_duplicate_is_409() {
    let (app, _) = seeded().await;
    let (status, _) = send(
        app.clone(),
        post_json("/api/doctors", &new_doctor("Dr. Sam Iyer")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, post_json("/api/doctors", &new_doctor("Dr Sam Iyer"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_create_missing_fields_is_400() {
    let (app, repo) = seeded().await;
    let (status, body) = send(
        app,
        post_json("/api/doctors", &json!({ "name": "Dr. Partial", "gender": "Male" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELDS");
    assert_eq!(
        body["error"],
        "Missing required fields: specialty, experience, qualification, consultationFee"
    );
    assert_eq!(
        body["fields"],
        json!(["specialty", "experience", "qualification", "consultationFee"])
    );
    assert_eq!(repo.len(), 10);
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let (app, _) = seeded().await;
    let request = Request::post("/api/doctors")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_slug_is_404() {
    let (app, _) = seeded().await;
    let (status, body) = send(app, get("/api/doctors/dr-nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
