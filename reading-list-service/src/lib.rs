//! Reading list service.
//!
//! Fetches a user's "already read" shelf from Open Library, enriches every
//! book with author and rating data, caches the merged list in a single slot,
//! and serves it as a paginated, sortable, editable table over HTTP.
//!
//! - **`services::catalog`**: read-only Open Library client.
//! - **`services::enrichment`**: primary fetch, per-book author/rating fan-out, ordered fan-in.
//! - **`services::cache`**: the `bookData` slot over a pluggable `CacheStore`.
//! - **`services::loader`**: cache-first load driving the `LoadState` machine.
//! - **`services::table`**: sorting, pagination and local cell edits.
//! - **`routes`**: axum handlers.

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
