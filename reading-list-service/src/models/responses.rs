use crate::services::table::TablePage;
use crate::state::LoadSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadStatusResponse {
    pub state: String,
    pub count: usize,
    pub source: Option<LoadSource>,
    pub loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BooksResponse {
    pub source: LoadSource,
    pub loaded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub page: TablePage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditRequest {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub status: String,
}
