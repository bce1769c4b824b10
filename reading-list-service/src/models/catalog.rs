//! Wire shapes of the Open Library endpoints the service reads.

use crate::models::book::RawReadingEntry;
use crate::utils::text::non_empty;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReadingLogResponse {
    pub reading_log_entries: Vec<ReadingLogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ReadingLogEntry {
    pub work: RawReadingEntry,
}

#[derive(Debug, Deserialize)]
pub struct AuthorSearchResponse {
    #[serde(default)]
    pub docs: Vec<AuthorDoc>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorDoc {
    #[serde(default)]
    pub top_subjects: Vec<String>,
    pub birth_date: Option<String>,
    pub top_work: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RatingsResponse {
    pub summary: Option<RatingsSummary>,
}

#[derive(Debug, Deserialize)]
pub struct RatingsSummary {
    pub average: Option<f64>,
}

/// Author fields used for enrichment. Empty catalog values are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorInfo {
    pub top_subject: Option<String>,
    pub birth_date: Option<String>,
    pub top_work: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingInfo {
    pub average: f64,
}

impl From<AuthorDoc> for AuthorInfo {
    fn from(doc: AuthorDoc) -> Self {
        Self {
            top_subject: doc.top_subjects.into_iter().next().and_then(non_empty),
            birth_date: doc.birth_date.and_then(non_empty),
            top_work: doc.top_work.and_then(non_empty),
        }
    }
}

impl AuthorSearchResponse {
    pub fn first_match(self) -> Option<AuthorInfo> {
        self.docs.into_iter().next().map(AuthorInfo::from)
    }
}

impl RatingsResponse {
    pub fn rating(&self) -> Option<RatingInfo> {
        self.summary
            .as_ref()
            .and_then(|summary| summary.average)
            .map(|average| RatingInfo { average })
    }
}
