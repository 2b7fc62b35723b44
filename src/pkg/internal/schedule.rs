use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::pkg::internal::scraper::Ingestor;
use crate::prelude::{Error, Result};

/// Starts the recurring scraper run on a six-field cron expression.
pub async fn start_scheduler(ingestor: Arc<Ingestor>, schedule: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let ingestor = ingestor.clone();
        Box::pin(async move {
            run_scheduled(&ingestor).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("scheduled scraper runs on '{}'", schedule);
    Ok(scheduler)
}

/// Scheduled runs have no caller, so every outcome ends up in the log.
pub async fn run_scheduled(ingestor: &Ingestor) {
    tracing::info!("scheduled job: running scraper");
    match ingestor.ingest().await {
        Ok(report) => {
            tracing::info!("scheduled scraper run completed, added {} new jobs", report.inserted)
        }
        Err(Error::IngestionBusy) => {
            tracing::info!("previous scraper run still in progress, skipping scheduled run")
        }
        Err(e) => tracing::error!("scheduled scraper run failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::scraper::{tests::defaults, ScraperCommand};
    use crate::pkg::internal::store::MemoryJobStore;

    fn ingestor(script: &str, dir: &tempfile::TempDir) -> Arc<Ingestor> {
        Arc::new(Ingestor::new(
            Arc::new(MemoryJobStore::new()),
            ScraperCommand::new("sh", vec!["-c".into(), script.into()], dir.path().join("out.json"), None),
            defaults(),
        ))
    }

    #[tokio::test]
    #[traced_test]
    async fn scheduled_failure_is_logged_not_raised() -> Result<()> {
        let dir = tempfile::tempdir()?;
        run_scheduled(&ingestor("exit 2", &dir)).await;
        assert!(logs_contain("scheduled scraper run failed"));
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn scheduled_success_logs_count() -> Result<()> {
        let dir = tempfile::tempdir()?;
        run_scheduled(&ingestor("true", &dir)).await;
        assert!(logs_contain("added 0 new jobs"));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread")]
    #[traced_test]
    async fn scheduler_accepts_twice_daily_expression() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut scheduler = start_scheduler(ingestor("true", &dir), "0 0 */12 * * *")
            .await?;
        scheduler.shutdown().await?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread")]
    #[traced_test]
    async fn scheduler_rejects_malformed_expression() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(start_scheduler(ingestor("true", &dir), "twice a day").await.is_err());
        Ok(())
    }
}
