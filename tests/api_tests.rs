//! HTTP API integration tests
//!
//! Drives the full route tree (create, redirect, peek, admin, health)
//! with `actix_web::test` against a tempfile SQLite storage.

use std::sync::Arc;
use std::sync::Once;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use shorturl::api::services::{
    AppStartTime, admin_routes, health_routes, redirect_routes, shorten_routes,
};
use shorturl::config::init_config;
use shorturl::services::LinkService;
use shorturl::storage::SeaOrmStorage;

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();
static TEST_DIR: std::sync::OnceLock<TempDir> = std::sync::OnceLock::new();
static STORAGE: std::sync::OnceLock<Arc<SeaOrmStorage>> = std::sync::OnceLock::new();
static ENV_INIT: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();

async fn init_test_env() {
    INIT.call_once(|| {
        init_config();
    });

    ENV_INIT
        .get_or_init(|| async {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db_path = temp_dir.path().join("api_test.db");
            let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

            let storage = Arc::new(
                SeaOrmStorage::new(&db_url, "sqlite")
                    .await
                    .expect("Failed to create storage"),
            );
            let _ = STORAGE.set(storage);
            let _ = TEST_DIR.set(temp_dir);
        })
        .await;
}

fn get_storage() -> Arc<SeaOrmStorage> {
    STORAGE.get().expect("Storage not initialized").clone()
}

/// Build the full application exactly as `main` wires it.
macro_rules! shorturl_app {
    () => {{
        let storage = get_storage();
        let link_service = Arc::new(LinkService::new(storage.clone()));
        test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(link_service))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(shorten_routes)
                .service(admin_routes())
                .service(health_routes())
                .configure(redirect_routes),
        )
        .await
    }};
}

macro_rules! create_link {
    ($app:expr, $target:expr, $custom_key:expr) => {{
        let mut payload = json!({ "target_url": $target });
        let custom_key: Option<&str> = $custom_key;
        if let Some(key) = custom_key {
            payload["custom_key"] = json!(key);
        }

        let req = TestRequest::post().uri("/url").set_json(payload).to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

fn key_from_url(body: &Value) -> String {
    body["url"]
        .as_str()
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string()
}

fn secret_from_admin_url(body: &Value) -> String {
    body["admin_url"]
        .as_str()
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string()
}

// =============================================================================
// Root & health
// =============================================================================

#[tokio::test]
async fn test_root_welcome() {
    init_test_env().await;
    let app = shorturl_app!();

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!("Welcome to the URL shortener API :)"));
}

#[tokio::test]
async fn test_health_check() {
    init_test_env().await;
    let app = shorturl_app!();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"]["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "sqlite");
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_create_url_returns_short_and_admin_urls() {
    init_test_env().await;
    let app = shorturl_app!();

    let body = create_link!(app, "https://example.com/created", None);

    assert_eq!(body["target_url"], "https://example.com/created");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["clicks"], 0);

    let key = key_from_url(&body);
    assert_eq!(key.len(), 5);

    let secret = secret_from_admin_url(&body);
    assert!(secret.starts_with(&format!("{}_", key)));
    assert!(body["admin_url"].as_str().unwrap().contains("/admin/"));
}

#[tokio::test]
async fn test_create_url_with_custom_key() {
    init_test_env().await;
    let app = shorturl_app!();

    let body = create_link!(app, "https://example.com/named", Some("api-named"));
    assert_eq!(key_from_url(&body), "api-named");
}

#[tokio::test]
async fn test_create_url_custom_key_conflict_is_409() {
    init_test_env().await;
    let app = shorturl_app!();

    let _ = create_link!(app, "https://example.com/one", Some("api-dup"));

    let req = TestRequest::post()
        .uri("/url")
        .set_json(json!({
            "target_url": "https://example.com/two",
            "custom_key": "api-dup"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);
    assert!(body["error"].as_str().unwrap().contains("api-dup"));
}

#[tokio::test]
async fn test_create_url_rejects_invalid_target() {
    init_test_env().await;
    let app = shorturl_app!();

    for target in ["not a url", "javascript:alert(1)", "ftp://example.com"] {
        let req = TestRequest::post()
            .uri("/url")
            .set_json(json!({ "target_url": target }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "accepted: {}", target);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1000);
    }
}

#[tokio::test]
async fn test_create_url_rejects_reserved_and_malformed_keys() {
    init_test_env().await;
    let app = shorturl_app!();

    for key in ["admin", "HEALTH", "ab", "has space"] {
        let req = TestRequest::post()
            .uri("/url")
            .set_json(json!({
                "target_url": "https://example.com/ok",
                "custom_key": key
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "accepted: {}", key);
    }
}

// =============================================================================
// Redirect & peek
// =============================================================================

#[tokio::test]
async fn test_redirect_to_target_and_count() {
    init_test_env().await;
    let app = shorturl_app!();

    let _ = create_link!(app, "https://example.com/redirected", Some("api-redir"));

    let req = TestRequest::get().uri("/api-redir").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert_eq!(location, "https://example.com/redirected");

    // The traversal was counted; inspection shows it without adding more.
    let req = TestRequest::get().uri("/peek/api-redir").to_request();
    let peek: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(peek["clicks"], 1);

    let req = TestRequest::get().uri("/peek/api-redir").to_request();
    let peek: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(peek["clicks"], 1);
}

#[tokio::test]
async fn test_redirect_unknown_key_is_404() {
    init_test_env().await;
    let app = shorturl_app!();

    let req = TestRequest::get().uri("/ZZZZZ").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1004);
    assert!(body["error"].as_str().unwrap().contains("/ZZZZZ"));
}

#[tokio::test]
async fn test_peek_returns_all_fields() {
    init_test_env().await;
    let app = shorturl_app!();

    let _ = create_link!(app, "https://example.com/peeked", Some("api-peek"));

    let req = TestRequest::get().uri("/peek/api-peek").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["key"], "api-peek");
    assert_eq!(body["target_url"], "https://example.com/peeked");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["clicks"], 0);
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_peek_unknown_key_is_404() {
    init_test_env().await;
    let app = shorturl_app!();

    let req = TestRequest::get().uri("/peek/UNKNW").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_info_by_secret_key() {
    init_test_env().await;
    let app = shorturl_app!();

    let created = create_link!(app, "https://example.com/admined", Some("api-admin1"));
    let secret = secret_from_admin_url(&created);

    let req = TestRequest::get()
        .uri(&format!("/admin/{}", secret))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["target_url"], "https://example.com/admined");
    assert_eq!(key_from_url(&body), "api-admin1");
}

#[tokio::test]
async fn test_admin_info_unknown_secret_is_404() {
    init_test_env().await;
    let app = shorturl_app!();

    let req = TestRequest::get().uri("/admin/NOPE_BADSECRET").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_deactivates_and_is_permanent() {
    init_test_env().await;
    let app = shorturl_app!();

    let created = create_link!(app, "https://example.com/deleted", Some("api-del"));
    let secret = secret_from_admin_url(&created);

    let req = TestRequest::delete()
        .uri(&format!("/admin/{}", secret))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .contains("https://example.com/deleted")
    );

    // Redirect is gone, peek still sees the inactive record.
    let req = TestRequest::get().uri("/api-del").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri("/peek/api-del").to_request();
    let peek: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(peek["is_active"], false);

    // Deleting again finds nothing.
    let req = TestRequest::delete()
        .uri(&format!("/admin/{}", secret))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
