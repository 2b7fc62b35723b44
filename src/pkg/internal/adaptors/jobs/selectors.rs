use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::filter::{escape_like, JobFilter, MatchKind};
use super::spec::{DistinctField, JobEntry, Pagination};
use crate::prelude::Result;

pub(super) const COLUMNS: &str =
    "id, title, company, location, experience, link, source, crawled_at, searched_title, searched_location";

pub struct JobSelector<'a> {
    pool: &'a PgPool,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!("SELECT {COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list(&self, filter: &JobFilter, pagination: Pagination) -> Result<Vec<JobEntry>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM jobs"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY crawled_at DESC, id LIMIT ")
            .push_bind(pagination.limit)
            .push(" OFFSET ")
            .push_bind(pagination.offset());
        let rows = qb.build_query_as::<JobEntry>().fetch_all(self.pool).await?;
        Ok(rows)
    }

    pub async fn count(&self, filter: &JobFilter) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs");
        push_filter(&mut qb, filter);
        let total = qb.build_query_scalar::<i64>().fetch_one(self.pool).await?;
        Ok(total)
    }

    pub async fn find_duplicate(&self, title: &str, company: &str, link: &str) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {COLUMNS} FROM jobs WHERE title = $1 AND company = $2 AND link = $3"
        ))
        .bind(title)
        .bind(company)
        .bind(link)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    pub async fn distinct(&self, field: DistinctField) -> Result<Vec<String>> {
        let column = field.column();
        let values = sqlx::query_scalar::<_, String>(&format!(
            "SELECT DISTINCT {column} FROM jobs WHERE {column} IS NOT NULL AND {column} <> ''"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(values)
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    for (i, clause) in filter.clauses().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(clause.field.column());
        match clause.kind {
            MatchKind::Exact => {
                qb.push(" = ").push_bind(clause.value.clone());
            }
            MatchKind::Contains => {
                qb.push(" ILIKE ")
                    .push_bind(format!("%{}%", escape_like(&clause.value)))
                    .push(" ESCAPE '\\'");
            }
        }
    }
}
