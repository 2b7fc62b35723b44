use serde::Serialize;
use uuid::Uuid;

use crate::pkg::internal::adaptors::jobs::{
    filter::JobFilter,
    spec::{DistinctField, JobEntry, Pagination},
};
use crate::pkg::internal::store::JobStore;
use crate::prelude::{Error, Result};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub jobs: Vec<JobEntry>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_jobs: i64,
}

pub async fn list_jobs(store: &dyn JobStore, filter: &JobFilter, pagination: Pagination) -> Result<JobPage> {
    tracing::debug!("fetching jobs: page={}, limit={}", pagination.page, pagination.limit);
    let jobs = store.list(filter, pagination).await?;
    let total = store.count(filter).await?;
    Ok(JobPage {
        jobs,
        current_page: pagination.page,
        total_pages: pagination.total_pages(total),
        total_jobs: total,
    })
}

/// Malformed ids are reported the same way as missing ones.
pub async fn get_job(store: &dyn JobStore, id: &str) -> Result<JobEntry> {
    let id = id.parse::<Uuid>().map_err(|_| Error::NotFound)?;
    store.get(id).await?.ok_or(Error::NotFound)
}

pub async fn searched_titles(store: &dyn JobStore) -> Result<Vec<String>> {
    store.distinct(DistinctField::SearchedTitle).await
}

pub async fn searched_locations(store: &dyn JobStore) -> Result<Vec<String>> {
    store.distinct(DistinctField::SearchedLocation).await
}
