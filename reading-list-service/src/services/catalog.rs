use crate::models::book::RawReadingEntry;
use crate::models::catalog::{
    AuthorInfo, AuthorSearchResponse, RatingInfo, RatingsResponse, ReadingLogResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org";
pub const DEFAULT_READING_LIST_USER: &str = "mekBot";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Read-only view of the book catalog. Each call is a single attempt.
#[async_trait]
pub trait CatalogApi {
    async fn fetch_reading_list(&self) -> Result<Vec<RawReadingEntry>, CatalogError>;
    async fn fetch_author_info(&self, author_name: &str)
        -> Result<Option<AuthorInfo>, CatalogError>;
    async fn fetch_rating_info(&self, work_key: &str) -> Result<Option<RatingInfo>, CatalogError>;
}

#[derive(Clone)]
pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
    user: String,
}

impl OpenLibraryClient {
    pub fn new(base_url: &str, user: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
        }
    }

    pub fn reading_list_url(&self) -> String {
        format!(
            "{}/people/{}/books/already-read.json",
            self.base_url, self.user
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogApi for OpenLibraryClient {
    async fn fetch_reading_list(&self) -> Result<Vec<RawReadingEntry>, CatalogError> {
        let url = self.reading_list_url();
        info!("Fetching reading list from {}", url);

        let log: ReadingLogResponse = self.get_json(&url, &[]).await?;

        Ok(log
            .reading_log_entries
            .into_iter()
            .map(|entry| entry.work)
            .collect())
    }

    async fn fetch_author_info(
        &self,
        author_name: &str,
    ) -> Result<Option<AuthorInfo>, CatalogError> {
        let url = format!("{}/search/authors.json", self.base_url);
        let search: AuthorSearchResponse = self.get_json(&url, &[("q", author_name)]).await?;

        Ok(search.first_match())
    }

    async fn fetch_rating_info(&self, work_key: &str) -> Result<Option<RatingInfo>, CatalogError> {
        let url = format!("{}/works/{}/ratings.json", self.base_url, work_key);
        let ratings: RatingsResponse = self.get_json(&url, &[]).await?;

        Ok(ratings.rating())
    }
}
