use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::conf::Settings;
use crate::pkg::internal::adaptors::jobs::spec::NewJob;
use crate::prelude::{Error, Result};

pub const DEFAULT_EXPERIENCE: &str = "Not specified";

/// One element of the scraper's output array, as written.
#[derive(Deserialize, Debug, Default)]
#[serde(from = "RawJobFields")]
pub struct RawJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub link: Option<String>,
    pub crawled_at: Option<String>,
    pub searched_title: Option<String>,
    pub searched_location: Option<String>,
}

/// Wire shape accepting both key spellings; snake_case wins when both appear.
#[derive(Deserialize)]
struct RawJobFields {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    experience: Option<String>,
    link: Option<String>,
    crawled_at: Option<String>,
    #[serde(rename = "crawledAt")]
    crawled_at_camel: Option<String>,
    searched_title: Option<String>,
    #[serde(rename = "searchedTitle")]
    searched_title_camel: Option<String>,
    searched_location: Option<String>,
    #[serde(rename = "searchedLocation")]
    searched_location_camel: Option<String>,
}

impl From<RawJobFields> for RawJob {
    fn from(f: RawJobFields) -> Self {
        RawJob {
            title: f.title,
            company: f.company,
            location: f.location,
            experience: f.experience,
            link: f.link,
            crawled_at: f.crawled_at.or(f.crawled_at_camel),
            searched_title: f.searched_title.or(f.searched_title_camel),
            searched_location: f.searched_location.or(f.searched_location_camel),
        }
    }
}

/// Values stamped on records that do not carry their own.
#[derive(Debug, Clone)]
pub struct IngestDefaults {
    pub source: String,
    pub searched_title: String,
    pub searched_location: String,
}

impl IngestDefaults {
    pub fn from_settings(settings: &Settings) -> Self {
        IngestDefaults {
            source: settings.job_source.clone(),
            searched_title: settings.default_searched_title.clone(),
            searched_location: settings.default_searched_location.clone(),
        }
    }
}

impl RawJob {
    pub fn normalize(self, defaults: &IngestDefaults, now: DateTime<Utc>) -> Result<NewJob> {
        let crawled_at = match self.crawled_at.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => parse_crawled_at(raw).unwrap_or_else(|| {
                tracing::warn!("unparseable crawled_at {:?}, using ingestion time", raw);
                now
            }),
            None => now,
        };
        Ok(NewJob {
            title: required("title", self.title)?,
            company: required("company", self.company)?,
            location: required("location", self.location)?,
            link: required("link", self.link)?,
            experience: or_default(self.experience, DEFAULT_EXPERIENCE),
            source: defaults.source.clone(),
            crawled_at,
            searched_title: Some(or_default(self.searched_title, &defaults.searched_title)),
            searched_location: Some(or_default(self.searched_location, &defaults.searched_location)),
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::InvalidRecord(format!("missing {field}")))
}

fn or_default(value: Option<String>, default: &str) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
}

/// RFC 3339, or a naive ISO-8601 timestamp taken as UTC.
pub fn parse_crawled_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
