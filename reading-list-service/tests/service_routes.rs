mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{spawn_open_library, USER};
use reading_list_service::models::storage::MemoryBackend;
use reading_list_service::routes::router;
use reading_list_service::services::cache::{ResultCache, Store};
use reading_list_service::services::catalog::OpenLibraryClient;
use reading_list_service::services::loader::load;
use reading_list_service::state::{AppContext, SharedContext};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn context(base_url: &str, store: Store) -> SharedContext {
    Arc::new(AppContext::new(
        Arc::new(OpenLibraryClient::new(base_url, USER)),
        ResultCache::new(store),
        10,
    ))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn books_are_unavailable_until_loaded() {
    let (base_url, _fake) = spawn_open_library().await;
    let app = router(context(&base_url, Arc::new(MemoryBackend::new())));

    let (status, _) = send(&app, get("/books")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(&app, get("/books/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "idle");

    let (status, body) = send(&app, get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "reading-list-service");
}

#[tokio::test]
async fn sorted_page_after_network_load() {
    let (base_url, _fake) = spawn_open_library().await;
    let ctx = context(&base_url, Arc::new(MemoryBackend::new()));
    assert!(load(&ctx).await);
    let app = router(ctx);

    let (status, body) = send(&app, get("/books?sort=first_publish_year&order=desc")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "network");
    assert_eq!(body["total"], 3);
    assert_eq!(body["page_count"], 1);
    assert_eq!(body["rows"][0]["title"], "Lost Book");
    assert_eq!(body["rows"][0]["row"], 2);
    assert_eq!(body["rows"][2]["rating"], "4.50");

    let (status, _) = send(&app, get("/books?sort=publisher")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn second_start_is_served_from_cache_without_network() {
    let (base_url, fake) = spawn_open_library().await;
    let store: Store = Arc::new(MemoryBackend::new());

    assert!(load(&context(&base_url, store.clone())).await);
    let after_first = fake.requests();
    assert_eq!(after_first, 7);

    let ctx = context(&base_url, store);
    assert!(load(&ctx).await);
    let app = router(ctx);

    let (_, body) = send(&app, get("/books/status")).await;
    assert_eq!(body["state"], "ready");
    assert_eq!(body["source"], "cache");
    assert_eq!(body["count"], 3);
    assert_eq!(fake.requests(), after_first);
}

#[tokio::test]
async fn edits_change_the_view_but_not_the_cache() {
    let (base_url, _fake) = spawn_open_library().await;
    let store: Store = Arc::new(MemoryBackend::new());
    let ctx = context(&base_url, store.clone());
    assert!(load(&ctx).await);
    let app = router(ctx);

    let edit = Request::builder()
        .method("PATCH")
        .uri("/books/0")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"column": "rating", "value": "5.00"}"#))
        .unwrap();
    let (status, body) = send(&app, edit).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], "5.00");

    let (_, body) = send(&app, get("/books")).await;
    assert_eq!(body["rows"][0]["rating"], "5.00");

    let cached = ResultCache::new(store).load().await.unwrap();
    assert_eq!(cached[0].rating.as_deref(), Some("4.50"));

    let missing = Request::builder()
        .method("PATCH")
        .uri("/books/42")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"column": "title", "value": "x"}"#))
        .unwrap();
    let (status, _) = send(&app, missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reload_refetches_from_catalog() {
    let (base_url, fake) = spawn_open_library().await;
    let store: Store = Arc::new(MemoryBackend::new());
    ResultCache::new(store.clone()).store(&[]).await;

    let ctx = context(&base_url, store);
    assert!(load(&ctx).await);
    let app = router(ctx);
    assert_eq!(fake.requests(), 0);

    let reload = Request::builder()
        .method("POST")
        .uri("/books/reload")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, reload).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "reloading");

    let mut ready = Value::Null;
    for _ in 0..100 {
        let (_, body) = send(&app, get("/books/status")).await;
        if body["state"] == "ready" && body["source"] == "network" {
            ready = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(ready["count"], 3);
    assert_eq!(fake.requests(), 7);
}
