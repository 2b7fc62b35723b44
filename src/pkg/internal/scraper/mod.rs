//! Scrape-and-ingest pipeline.
//!
//! A run spawns the external scraper, reads the JSON array it leaves in its
//! output file and stores every record whose (title, company, link) is new.
//! Records are handled one at a time; a bad record is logged and skipped
//! without failing the run.

mod guard;
mod process;
mod record;

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use guard::RunGuard;
pub use process::ScraperCommand;
use record::RawJob;
pub use record::IngestDefaults;

use crate::conf::Settings;
use crate::pkg::internal::store::JobStore;
use crate::prelude::{Error, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum Outcome {
    Inserted,
    Duplicate,
}

pub struct Ingestor {
    store: Arc<dyn JobStore>,
    scraper: ScraperCommand,
    defaults: IngestDefaults,
    guard: RunGuard,
}

impl Ingestor {
    pub fn new(store: Arc<dyn JobStore>, scraper: ScraperCommand, defaults: IngestDefaults) -> Self {
        Ingestor {
            store,
            scraper,
            defaults,
            guard: RunGuard::new(),
        }
    }

    pub fn from_settings(store: Arc<dyn JobStore>, settings: &Settings) -> Self {
        let scraper = ScraperCommand::new(
            settings.scraper_program.clone(),
            settings.scraper_args(),
            settings.scraper_output.clone(),
            settings.scraper_timeout(),
        );
        Self::new(store, scraper, IngestDefaults::from_settings(settings))
    }

    /// Runs the scraper and stores the new records.
    ///
    /// Fails with [`Error::IngestionBusy`] while another run is in progress.
    pub async fn ingest(&self) -> Result<IngestReport> {
        let _permit = self.guard.try_acquire().ok_or(Error::IngestionBusy)?;

        self.scraper.clear_output().await?;
        self.scraper.run().await?;
        let records = self.scraper.read_output().await?;
        tracing::info!("scraper produced {} records", records.len());

        let mut report = IngestReport::default();
        for (i, record) in records.into_iter().enumerate() {
            match self.process(record).await {
                Ok(Outcome::Inserted) => report.inserted += 1,
                Ok(Outcome::Duplicate) => report.skipped += 1,
                Err(e) => {
                    tracing::warn!("skipping scraped record #{}: {}", i, e);
                    report.failed += 1;
                }
            }
        }
        tracing::info!(
            "ingestion finished: {} new, {} already stored, {} failed",
            report.inserted,
            report.skipped,
            report.failed
        );
        Ok(report)
    }

    async fn process(&self, record: Value) -> Result<Outcome> {
        let raw: RawJob = serde_json::from_value(record).map_err(|e| Error::InvalidRecord(e.to_string()))?;
        let job = raw.normalize(&self.defaults, Utc::now())?;

        if self
            .store
            .find_duplicate(&job.title, &job.company, &job.link)
            .await?
            .is_some()
        {
            tracing::debug!("job already exists: {} at {}", job.title, job.company);
            return Ok(Outcome::Duplicate);
        }

        match self.store.insert(job).await? {
            Some(entry) => {
                tracing::info!("new job added: {} at {}", entry.title, entry.company);
                Ok(Outcome::Inserted)
            }
            None => Ok(Outcome::Duplicate),
        }
    }
}
