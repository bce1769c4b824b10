//! Sorting, pagination and cell edits over the loaded records.

use crate::models::book::BookRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

pub const PAGE_SIZES: [usize; 6] = [10, 20, 30, 40, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Title,
    Key,
    AuthorNames,
    FirstPublishYear,
    Subject,
    AuthorBirthDate,
    AuthorTopWork,
    Rating,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Title,
        Column::Key,
        Column::AuthorNames,
        Column::FirstPublishYear,
        Column::Subject,
        Column::AuthorBirthDate,
        Column::AuthorTopWork,
        Column::Rating,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Key => "key",
            Column::AuthorNames => "author_names",
            Column::FirstPublishYear => "first_publish_year",
            Column::Subject => "subject",
            Column::AuthorBirthDate => "author_birth_date",
            Column::AuthorTopWork => "author_top_work",
            Column::Rating => "rating",
        }
    }

    fn text(self, record: &BookRecord) -> Option<&str> {
        match self {
            Column::Title => Some(&record.title),
            Column::Key => Some(&record.key),
            Column::AuthorNames => Some(&record.author_names),
            Column::FirstPublishYear => None,
            Column::Subject => record.subject.as_deref(),
            Column::AuthorBirthDate => record.author_birth_date.as_deref(),
            Column::AuthorTopWork => record.author_top_work.as_deref(),
            Column::Rating => record.rating.as_deref(),
        }
    }

    /// Absent values sort after present ones in ascending order.
    fn compare(self, a: &BookRecord, b: &BookRecord) -> Ordering {
        let by_presence = |x: Option<Ordering>, a_some: bool, b_some: bool| match (a_some, b_some) {
            (true, true) => x.unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        };

        match self {
            Column::FirstPublishYear => {
                let (x, y) = (a.first_publish_year, b.first_publish_year);
                by_presence(x.zip(y).map(|(x, y)| x.cmp(&y)), x.is_some(), y.is_some())
            }
            _ => {
                let (x, y) = (self.text(a), self.text(b));
                by_presence(
                    x.zip(y).map(|(x, y)| x.to_lowercase().cmp(&y.to_lowercase())),
                    x.is_some(),
                    y.is_some(),
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl std::fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown column '{}'", self.0)
    }
}

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|column| column.name() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableQuery {
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    pub sort: Option<Column>,
    pub order: SortOrder,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            order: SortOrder::Asc,
        }
    }
}

pub fn normalize_page_size(size: usize) -> usize {
    if PAGE_SIZES.contains(&size) {
        size
    } else {
        DEFAULT_PAGE_SIZE
    }
}

/// One page of table rows. `row` indexes refer to the unsorted record order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub row: usize,
    #[serde(flatten)]
    pub record: BookRecord,
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

pub fn build_page(records: &[BookRecord], query: &TableQuery) -> TablePage {
    let page_size = normalize_page_size(query.page_size);
    let mut order: Vec<usize> = (0..records.len()).collect();

    if let Some(column) = query.sort {
        order.sort_by(|&a, &b| {
            let ordering = column.compare(&records[a], &records[b]);
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let page_count = page_count(records.len(), page_size);
    let page = query.page.clamp(1, page_count);

    let rows = order
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .map(|row| TableRow {
            row,
            record: records[row].clone(),
        })
        .collect();

    TablePage {
        page,
        page_count,
        page_size,
        total: records.len(),
        can_previous: page > 1,
        can_next: page < page_count,
        rows,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    RowOutOfRange(usize),
    InvalidYear(String),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::RowOutOfRange(row) => write!(f, "row {} does not exist", row),
            EditError::InvalidYear(value) => write!(f, "'{}' is not a year", value),
        }
    }
}

/// Replaces one cell of the in-memory table.
pub fn edit_cell(
    records: &mut [BookRecord],
    row: usize,
    column: Column,
    value: String,
) -> Result<(), EditError> {
    let record = records.get_mut(row).ok_or(EditError::RowOutOfRange(row))?;

    match column {
        Column::Title => record.title = value,
        Column::Key => record.key = value,
        Column::AuthorNames => record.author_names = value,
        Column::FirstPublishYear => {
            let trimmed = value.trim();
            record.first_publish_year = if trimmed.is_empty() {
                None
            } else {
                Some(
                    trimmed
                        .parse()
                        .map_err(|_| EditError::InvalidYear(value.clone()))?,
                )
            };
        }
        Column::Subject => record.subject = Some(value),
        Column::AuthorBirthDate => record.author_birth_date = Some(value),
        Column::AuthorTopWork => record.author_top_work = Some(value),
        Column::Rating => record.rating = Some(value),
    }

    Ok(())
}
