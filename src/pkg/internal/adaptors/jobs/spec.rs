use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
pub struct JobEntry {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub experience: String,
    pub link: String,
    pub source: String,
    pub crawled_at: DateTime<Utc>,
    pub searched_title: Option<String>,
    pub searched_location: Option<String>,
}

/// A normalized posting that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub experience: String,
    pub link: String,
    pub source: String,
    pub crawled_at: DateTime<Utc>,
    pub searched_title: Option<String>,
    pub searched_location: Option<String>,
}

impl NewJob {
    pub fn into_entry(self, id: Uuid) -> JobEntry {
        JobEntry {
            id,
            title: self.title,
            company: self.company,
            location: self.location,
            experience: self.experience,
            link: self.link,
            source: self.source,
            crawled_at: self.crawled_at,
            searched_title: self.searched_title,
            searched_location: self.searched_location,
        }
    }
}

/// Columns served by the distinct-value lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    SearchedTitle,
    SearchedLocation,
}

impl DistinctField {
    pub fn column(self) -> &'static str {
        match self {
            DistinctField::SearchedTitle => "searched_title",
            DistinctField::SearchedLocation => "searched_location",
        }
    }

    pub fn value_of(self, job: &JobEntry) -> Option<&str> {
        match self {
            DistinctField::SearchedTitle => job.searched_title.as_deref(),
            DistinctField::SearchedLocation => job.searched_location.as_deref(),
        }
    }
}

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// One-based page window over the crawled_at-descending job order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Values below one fall back to the defaults.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Pagination {
            page: page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total - 1) / self.limit + 1
    }
}
