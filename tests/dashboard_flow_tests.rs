// Integration tests for the caredesk HTTP surface
//
// Tests cover:
// - Admin gate redirects
// - Post lifecycle through the admin API and the public API
// - Diagnosis intake and history saving
// - Backend client against a running server

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use caredesk::api::{app_state::AppState, create_router};
use caredesk::client::BackendClient;
use caredesk::config::AppConfig;
use caredesk::models::diagnosis::DiagnosisInput;
use caredesk::models::profile::Profile;
use caredesk::security::auth::JwtTokenGenerator;
use caredesk::services::post::PostQuery;
use caredesk::storage::{MemoryStore, Store};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tower::ServiceExt;

struct Harness {
    router: axum::Router,
    store: Arc<MemoryStore>,
    admin_token: String,
    user_token: String,
}

#[fixture]
fn harness() -> Harness {
    let config = AppConfig::development();
    let store = Arc::new(MemoryStore::new());
    store.seed_profile(Profile::new("editor").with_preference("is_admin", json!(true)));
    store.seed_profile(Profile::new("patient"));

    let tokens = JwtTokenGenerator::from_config(&config.auth, 600);
    Harness {
        router: create_router(
            AppState::from_config(Store::memory(store.clone()), &config),
            &config.server,
        ),
        store,
        admin_token: tokens.generate_token("editor", Some("editor@example.com")).unwrap(),
        user_token: tokens.generate_token("patient", None).unwrap(),
    }
}

async fn call(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[rstest]
#[case("GET", "/api/v1/admin")]
#[case("GET", "/api/v1/admin/posts")]
#[case("GET", "/api/v1/admin/categories")]
#[case("DELETE", "/api/v1/admin/posts/any?confirm=true")]
#[tokio::test]
async fn test_patient_never_reaches_admin(harness: Harness, #[case] method: &str, #[case] uri: &str) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", harness.user_token))
        .body(Body::empty())
        .unwrap();

    let response = harness.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[rstest]
#[tokio::test]
async fn test_post_lifecycle_visible_publicly(harness: Harness) {
    let (status, created) = call(
        &harness.router,
        json_request(
            "POST",
            "/api/v1/admin/posts",
            Some(&harness.admin_token),
            json!({
                "title": "Staying Hydrated",
                "content": "<p>Drink water.</p>",
                "excerpt": "Why water matters",
                "category": "Wellness",
                "image_url": "/img/water.png"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["author_id"], "editor");
    assert_eq!(created["image_url"], "/img/water.png");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, page) = call(
        &harness.router,
        Request::builder()
            .uri("/api/posts?search=hydrated")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["posts"][0]["id"], id.as_str());

    let (status, _) = call(
        &harness.router,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/admin/posts/{}?confirm=true", id))
            .header(header::AUTHORIZATION, format!("Bearer {}", harness.admin_token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &harness.router,
        Request::builder()
            .uri(format!("/api/posts/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_intake_then_save(harness: Harness) {
    let input = json!({"symptom": "fatigue", "severity": "mild", "duration": "more_than_week"});

    let (status, result) = call(
        &harness.router,
        json_request("POST", "/api/v1/diagnosis", None, input.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["condition"], "Kelelahan Kronis");

    let (status, saved) = call(
        &harness.router,
        json_request(
            "POST",
            "/api/v1/diagnosis/history",
            Some(&harness.user_token),
            input,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["saved"], true);

    let rows = harness.store.history_for("patient");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].condition, "Kelelahan Kronis");
    assert_eq!(rows[0].symptoms, "Kelelahan");
    assert_eq!(rows[0].severity, "Ringan");
    assert_eq!(rows[0].confidence, 0.65);
    assert_eq!(
        rows[0].recommendations,
        "Tetapkan jadwal tidur yang teratur, Atur kecepatan diri selama beraktivitas, \
         Hindari kafein, alkohol, dan nikotin, \
         Pertimbangkan untuk berbicara dengan penyedia layanan kesehatan"
    );
}

#[rstest]
#[tokio::test]
async fn test_backend_client_against_live_server(harness: Harness) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = harness.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = BackendClient::new(
        Some(format!("http://{}/api", addr)),
        std::time::Duration::from_secs(5),
    )
    .unwrap();

    let health = client.check_api_health().await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.message, "API is running");

    let result = client
        .submit_diagnosis(&DiagnosisInput::new("fever", "moderate", "4_7_days"))
        .await
        .unwrap();
    assert_eq!(result.condition, "Influenza");
    assert_eq!(result.confidence, 0.85);

    let page = client.fetch_blog_posts(&PostQuery::default()).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.posts.is_empty());
}
