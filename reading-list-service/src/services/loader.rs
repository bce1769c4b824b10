use crate::models::book::BookRecord;
use crate::services::cache::ResultCache;
use crate::services::catalog::CatalogApi;
use crate::services::enrichment::build_book_records;
use crate::state::{LoadSource, SharedContext};
use tracing::info;

/// Serves the cached records when present, otherwise runs the enrichment
/// pipeline and caches its output.
pub async fn load_or_build<C>(catalog: &C, cache: &ResultCache) -> (Vec<BookRecord>, LoadSource)
where
    C: CatalogApi + ?Sized,
{
    if let Some(records) = cache.load().await {
        return (records, LoadSource::Cache);
    }

    info!("Cache miss, building reading list from catalog");
    let records = build_book_records(catalog).await;
    cache.store(&records).await;

    (records, LoadSource::Network)
}

/// Runs one load through the context's state machine. Returns `false` when a
/// load was already in progress.
pub async fn load(ctx: &SharedContext) -> bool {
    if !ctx.begin_loading().await {
        return false;
    }

    let (records, source) = load_or_build(ctx.catalog.as_ref(), &ctx.cache).await;
    info!("Reading list ready: {} records from {:?}", records.len(), source);
    ctx.finish_loading(records, source).await;

    true
}

/// Drops the cached slot and loads again from the catalog.
pub async fn reload(ctx: &SharedContext) -> bool {
    if !ctx.begin_loading().await {
        return false;
    }

    ctx.cache.clear().await;
    let (records, source) = load_or_build(ctx.catalog.as_ref(), &ctx.cache).await;
    ctx.finish_loading(records, source).await;

    true
}
