pub mod books;
pub mod health;

use crate::state::SharedContext;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/status", get(health::health_check))
        .route("/books", get(books::list_books))
        .route("/books/status", get(books::load_status))
        .route("/books/reload", post(books::reload_books))
        .route("/books/:row", patch(books::edit_book))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
