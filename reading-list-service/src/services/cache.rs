use crate::models::book::BookRecord;
use crate::models::storage::CacheStore;
use std::sync::Arc;
use tracing::{info, warn};

pub const CACHE_SLOT: &str = "bookData";

pub type Store = Arc<dyn CacheStore + Send + Sync>;

/// The enriched reading list, kept in one fixed slot of a key-value store.
#[derive(Clone)]
pub struct ResultCache {
    store: Store,
}

impl ResultCache {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns the stored records, or `None` when the slot is empty,
    /// unreadable, or holds content that no longer parses.
    pub async fn load(&self) -> Option<Vec<BookRecord>> {
        let raw = match self.store.get(CACHE_SLOT).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read cache slot {}: {}", CACHE_SLOT, e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<BookRecord>>(&raw) {
            Ok(records) => {
                info!("Loaded {} records from cache", records.len());
                Some(records)
            }
            Err(e) => {
                warn!("Ignoring malformed cache slot {}: {}", CACHE_SLOT, e);
                None
            }
        }
    }

    pub async fn store(&self, records: &[BookRecord]) {
        let value = match serde_json::to_string(records) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to serialize {} records: {}", records.len(), e);
                return;
            }
        };

        match self.store.set(CACHE_SLOT, &value).await {
            Ok(()) => info!("Stored {} records in cache", records.len()),
            Err(e) => warn!("Failed to write cache slot {}: {}", CACHE_SLOT, e),
        }
    }

    pub async fn clear(&self) {
        if let Err(e) = self.store.delete(CACHE_SLOT).await {
            warn!("Failed to clear cache slot {}: {}", CACHE_SLOT, e);
        }
    }
}
