use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    pkg::server::state::AppState,
    prelude::{Error, Result},
};

#[derive(Serialize, Debug)]
pub struct RunSummary {
    pub message: String,
    pub count: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Runs the scraper and waits for the ingestion result.
///
/// The run is spawned so a client hanging up does not cancel it halfway.
pub async fn run(State(state): State<AppState>) -> Result<Json<RunSummary>> {
    tracing::info!("manually triggering job scraper");
    let ingestor = state.ingestor.clone();
    let report = tokio::spawn(async move { ingestor.ingest().await })
        .await
        .map_err(|e| Error::Scraper(format!("ingestion task failed: {e}")))??;
    Ok(Json(RunSummary {
        message: format!(
            "Scraper completed successfully. Added {} new jobs.",
            report.inserted
        ),
        count: report.inserted,
        skipped: report.skipped,
        failed: report.failed,
    }))
}
