use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::JobStore;
use crate::pkg::internal::adaptors::jobs::{
    filter::JobFilter,
    spec::{DistinctField, JobEntry, NewJob, Pagination},
};
use crate::prelude::Result;

/// Process-local store, kept sorted by crawled_at descending.
#[derive(Debug, Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<JobEntry>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_key(job: &JobEntry, title: &str, company: &str, link: &str) -> bool {
    job.title == title && job.company == company && job.link == link
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list(&self, filter: &JobFilter, pagination: Pagination) -> Result<Vec<JobEntry>> {
        let jobs = self.jobs.read().await;
        Ok(jobs
            .iter()
            .filter(|j| filter.matches(j))
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(pagination.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().filter(|j| filter.matches(j)).count() as i64)
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobEntry>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn find_duplicate(&self, title: &str, company: &str, link: &str) -> Result<Option<JobEntry>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|j| same_key(j, title, company, link)).cloned())
    }

    async fn insert(&self, job: NewJob) -> Result<Option<JobEntry>> {
        let mut jobs = self.jobs.write().await;
        if jobs.iter().any(|j| same_key(j, &job.title, &job.company, &job.link)) {
            return Ok(None);
        }
        let entry = job.into_entry(Uuid::new_v4());
        let at = jobs.partition_point(|j| {
            (j.crawled_at, std::cmp::Reverse(j.id)) >= (entry.crawled_at, std::cmp::Reverse(entry.id))
        });
        jobs.insert(at, entry.clone());
        Ok(Some(entry))
    }

    async fn distinct(&self, field: DistinctField) -> Result<Vec<String>> {
        let jobs = self.jobs.read().await;
        let mut seen = HashSet::new();
        Ok(jobs
            .iter()
            .filter_map(|j| field.value_of(j))
            .filter(|v| !v.is_empty())
            .filter(|v| seen.insert(*v))
            .map(String::from)
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
