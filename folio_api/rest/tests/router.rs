use std::{path::Path, sync::Arc};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use folio_api_rest::{RestServer, RestServerConfig};
use folio_core_contact_contracts::MockContactFeatureService;
use folio_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use folio_demo::CONTACT_JO;
use tower::ServiceExt;

const INDEX: &str = "<!DOCTYPE html><title>Portfolio</title>";
const STYLE: &str = "body { margin: 0; }";

fn setup(
    health: MockHealthFeatureService,
    contact: MockContactFeatureService,
) -> (tempfile::TempDir, Router) {
    let static_dir = tempfile::tempdir().unwrap();
    write(static_dir.path(), "index.html", INDEX);
    std::fs::create_dir(static_dir.path().join("css")).unwrap();
    write(static_dir.path(), "css/style.css", STYLE);

    let config = RestServerConfig {
        addr: ([127, 0, 0, 1], 0).into(),
        static_dir: Arc::new(static_dir.path().to_owned()),
    };
    let router = RestServer::new(health, contact, config).router();

    (static_dir, router)
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn serves_static_files() {
    let (_dir, router) = setup(MockHealthFeatureService::new(), MockContactFeatureService::new());

    let (status, body) = get(router, "/css/style.css").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, STYLE);
}

#[tokio::test]
async fn serves_index_on_root() {
    let (_dir, router) = setup(MockHealthFeatureService::new(), MockContactFeatureService::new());

    let (status, body) = get(router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, INDEX);
}

#[tokio::test]
async fn unknown_route_falls_back_to_index() {
    let (_dir, router) = setup(MockHealthFeatureService::new(), MockContactFeatureService::new());

    let (status, body) = get(router, "/projects/some-project").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, INDEX);
}

#[tokio::test]
async fn health() {
    let health = MockHealthFeatureService::new().with_get_status(HealthStatus { email: true });
    let (_dir, router) = setup(health, MockContactFeatureService::new());

    let (status, body) = get(router, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = serde_json::from_str::<serde_json::Value>(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"status": "Server is running", "email": true})
    );
}

#[tokio::test]
async fn send_email_with_request_id() {
    let contact = MockContactFeatureService::new().with_send_message(CONTACT_JO.clone(), Ok(()));
    let (_dir, router) = setup(MockHealthFeatureService::new(), contact);

    let response = router
        .oneshot(
            Request::post("/api/send-email")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name":"Jo","email":"jo@example.com","subject":"Hi","message":"Hello there!"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
