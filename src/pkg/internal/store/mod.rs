//! Persistence boundary for job postings.
//!
//! Handlers and the ingestion pipeline only see [`JobStore`]; the backend is
//! picked from settings when the application state is built.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryJobStore;
pub use postgres::PgJobStore;

use crate::pkg::internal::adaptors::jobs::{
    filter::JobFilter,
    spec::{DistinctField, JobEntry, NewJob, Pagination},
};
use crate::prelude::Result;

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Matching jobs, most recently crawled first.
    async fn list(&self, filter: &JobFilter, pagination: Pagination) -> Result<Vec<JobEntry>>;

    async fn count(&self, filter: &JobFilter) -> Result<i64>;

    async fn get(&self, id: Uuid) -> Result<Option<JobEntry>>;

    async fn find_duplicate(&self, title: &str, company: &str, link: &str) -> Result<Option<JobEntry>>;

    /// Persists a job. `None` means the (title, company, link) key was already taken.
    async fn insert(&self, job: NewJob) -> Result<Option<JobEntry>>;

    /// Distinct non-empty values of `field`, in no particular order.
    async fn distinct(&self, field: DistinctField) -> Result<Vec<String>>;

    async fn ping(&self) -> Result<()>;
}
