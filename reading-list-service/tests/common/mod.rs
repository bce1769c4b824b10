//! A local stand-in for the Open Library endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const USER: &str = "mekBot";

#[derive(Default)]
pub struct FakeOpenLibrary {
    pub requests: AtomicUsize,
}

impl FakeOpenLibrary {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

type Shared = Arc<FakeOpenLibrary>;

async fn reading_list(
    Path(user): Path<String>,
    State(fake): State<Shared>,
) -> Result<Json<Value>, StatusCode> {
    fake.requests.fetch_add(1, Ordering::SeqCst);
    if user != USER {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(json!({
        "page": 1,
        "reading_log_entries": [
            {"work": {"title": "Dune", "key": "/works/OL123W",
                      "author_names": ["Frank Herbert"], "first_publish_year": 1965}},
            {"work": {"title": "A Wizard of Earthsea", "key": "/works/OL59W",
                      "author_names": ["Ursula K. Le Guin", "Ruth Robbins"],
                      "first_publish_year": 1968}},
            {"work": {"title": "Lost Book", "key": "/works/OL500W",
                      "author_names": ["Broken Author"], "first_publish_year": 2001}}
        ]
    })))
}

async fn search_authors(
    Query(params): Query<HashMap<String, String>>,
    State(fake): State<Shared>,
) -> Result<Json<Value>, StatusCode> {
    fake.requests.fetch_add(1, Ordering::SeqCst);

    match params.get("q").map(String::as_str) {
        Some("Ursula K. Le Guin") => Ok(Json(json!({
            "numFound": 1,
            "docs": [{"name": "Ursula K. Le Guin",
                      "top_subjects": ["Fantasy", "Fiction"],
                      "birth_date": "21 October 1929",
                      "top_work": "A Wizard of Earthsea"}]
        }))),
        Some("Broken Author") => Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => Ok(Json(json!({"numFound": 0, "docs": []}))),
    }
}

async fn ratings(
    Path(key): Path<String>,
    State(fake): State<Shared>,
) -> Result<Json<Value>, StatusCode> {
    fake.requests.fetch_add(1, Ordering::SeqCst);

    match key.as_str() {
        "OL123W" => Ok(Json(json!({"summary": {"average": 4.5, "count": 2}}))),
        "OL59W" => Ok(Json(json!({"summary": {"average": 4.0125, "count": 80}}))),
        _ => Ok(Json(json!({"summary": {"count": 0}}))),
    }
}

/// Starts the fake on an ephemeral port and returns its base URL.
pub async fn spawn_open_library() -> (String, Shared) {
    let fake: Shared = Arc::new(FakeOpenLibrary::default());

    let app = Router::new()
        .route("/people/:user/books/already-read.json", get(reading_list))
        .route("/search/authors.json", get(search_authors))
        .route("/works/:key/ratings.json", get(ratings))
        .with_state(fake.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), fake)
}
