use crate::models::catalog::{AuthorInfo, RatingInfo};
use crate::utils::text::{format_rating, work_key_from_path};
use serde::{Deserialize, Deserializer, Serialize};

/// Enrichment lookup succeeded but the catalog had nothing for the field.
pub const NOT_AVAILABLE: &str = "Not Available";
/// Enrichment lookup itself failed.
pub const LOOKUP_FAILED: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReadingEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_names: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
}

/// Missing and `null` catalog values both become the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub key: String,
    pub author_names: String,
    pub first_publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_top_work: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

impl From<RawReadingEntry> for BookRecord {
    fn from(entry: RawReadingEntry) -> Self {
        Self {
            title: entry.title,
            key: work_key_from_path(&entry.key).to_string(),
            author_names: entry.author_names.into_iter().next().unwrap_or_default(),
            first_publish_year: entry.first_publish_year,
            subject: None,
            author_birth_date: None,
            author_top_work: None,
            rating: None,
        }
    }
}

impl BookRecord {
    /// Fills the three author-derived fields from an author lookup outcome.
    pub fn apply_author<E>(&mut self, outcome: Result<Option<AuthorInfo>, E>) {
        match outcome {
            Ok(info) => {
                let info = info.unwrap_or_default();
                self.subject = Some(info.top_subject.unwrap_or_else(not_available));
                self.author_birth_date = Some(info.birth_date.unwrap_or_else(not_available));
                self.author_top_work = Some(info.top_work.unwrap_or_else(not_available));
            }
            Err(_) => {
                self.subject = Some(LOOKUP_FAILED.to_string());
                self.author_birth_date = Some(LOOKUP_FAILED.to_string());
                self.author_top_work = Some(LOOKUP_FAILED.to_string());
            }
        }
    }

    pub fn apply_rating<E>(&mut self, outcome: Result<Option<RatingInfo>, E>) {
        self.rating = Some(match outcome {
            Ok(Some(info)) => format_rating(info.average),
            Ok(None) => NOT_AVAILABLE.to_string(),
            Err(_) => LOOKUP_FAILED.to_string(),
        });
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}
