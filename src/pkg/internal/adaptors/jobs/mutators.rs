use sqlx::PgPool;
use uuid::Uuid;

use super::selectors::COLUMNS;
use super::spec::{JobEntry, NewJob};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a PgPool,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        JobMutator { pool }
    }

    /// Returns `None` when a job with the same title, company and link exists.
    pub async fn create(&self, job: NewJob) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            r#"
            INSERT INTO jobs (id, title, company, location, experience, link, source, crawled_at, searched_title, searched_location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT ON CONSTRAINT jobs_dedup_key DO NOTHING
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.experience)
        .bind(&job.link)
        .bind(&job.source)
        .bind(job.crawled_at)
        .bind(&job.searched_title)
        .bind(&job.searched_location)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }
}
