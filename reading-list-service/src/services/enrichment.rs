use crate::models::book::BookRecord;
use crate::services::catalog::CatalogApi;
use futures::future::join_all;
use tracing::{error, info, warn};

/// Fetches the reading list and enriches every entry with author and rating data.
///
/// Never fails: a failed primary fetch yields an empty list, and a failed
/// secondary lookup only marks the fields it feeds with the failure sentinel.
/// The output keeps the reading-list order.
pub async fn build_book_records<C>(catalog: &C) -> Vec<BookRecord>
where
    C: CatalogApi + ?Sized,
{
    let entries = match catalog.fetch_reading_list().await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Error fetching reading list: {}", e);
            return Vec::new();
        }
    };

    info!("Enriching {} reading list entries", entries.len());

    let lookups = entries
        .into_iter()
        .map(BookRecord::from)
        .map(|record| enrich_record(catalog, record));

    join_all(lookups).await
}

async fn enrich_record<C>(catalog: &C, mut record: BookRecord) -> BookRecord
where
    C: CatalogApi + ?Sized,
{
    let author_lookup = async {
        if record.author_names.is_empty() {
            Ok(None)
        } else {
            catalog.fetch_author_info(&record.author_names).await
        }
    };
    let rating_lookup = catalog.fetch_rating_info(&record.key);

    let (author, rating) = tokio::join!(author_lookup, rating_lookup);

    if let Err(e) = &author {
        warn!("Error fetching author data for {}: {}", record.author_names, e);
    }
    if let Err(e) = &rating {
        warn!("Error fetching rating for {}: {}", record.key, e);
    }

    record.apply_author(author);
    record.apply_rating(rating);
    record
}
