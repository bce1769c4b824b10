use crate::models::book::BookRecord;
use crate::services::cache::ResultCache;
use crate::services::catalog::CatalogApi;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

pub type Catalog = Arc<dyn CatalogApi + Send + Sync>;
pub type SharedContext = Arc<AppContext>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSource {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub records: Vec<BookRecord>,
    pub source: LoadSource,
    pub loaded_at: DateTime<Utc>,
}

/// `Idle -> Loading -> Ready`. A reload moves `Ready` back to `Loading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(Loaded),
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
        }
    }
}

/// Everything the service owns: the catalog, the cache, and the table state.
pub struct AppContext {
    pub catalog: Catalog,
    pub cache: ResultCache,
    pub state: RwLock<LoadState>,
    pub default_page_size: usize,
}

impl AppContext {
    pub fn new(catalog: Catalog, cache: ResultCache, default_page_size: usize) -> Self {
        Self {
            catalog,
            cache,
            state: RwLock::new(LoadState::Idle),
            default_page_size,
        }
    }

    /// Moves to `Loading` unless a load is already running.
    pub async fn begin_loading(&self) -> bool {
        let mut state = self.state.write().await;
        if *state == LoadState::Loading {
            return false;
        }
        *state = LoadState::Loading;
        true
    }

    pub async fn finish_loading(&self, records: Vec<BookRecord>, source: LoadSource) {
        *self.state.write().await = LoadState::Ready(Loaded {
            records,
            source,
            loaded_at: Utc::now(),
        });
    }
}
