use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::JobStore;
use crate::pkg::internal::adaptors::jobs::{
    filter::JobFilter,
    mutators::JobMutator,
    selectors::JobSelector,
    spec::{DistinctField, JobEntry, NewJob, Pagination},
};
use crate::prelude::Result;

#[derive(Debug, Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        PgJobStore { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list(&self, filter: &JobFilter, pagination: Pagination) -> Result<Vec<JobEntry>> {
        JobSelector::new(&self.pool).list(filter, pagination).await
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64> {
        JobSelector::new(&self.pool).count(filter).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobEntry>> {
        JobSelector::new(&self.pool).get_by_id(id).await
    }

    async fn find_duplicate(&self, title: &str, company: &str, link: &str) -> Result<Option<JobEntry>> {
        JobSelector::new(&self.pool).find_duplicate(title, company, link).await
    }

    async fn insert(&self, job: NewJob) -> Result<Option<JobEntry>> {
        JobMutator::new(&self.pool).create(job).await
    }

    async fn distinct(&self, field: DistinctField) -> Result<Vec<String>> {
        JobSelector::new(&self.pool).distinct(field).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("select 1").execute(&self.pool).await?;
        Ok(())
    }
}
