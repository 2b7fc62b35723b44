use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("job not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scraper failed: {0}")]
    Scraper(String),

    #[error("scraper timed out after {0:?}")]
    ScraperTimeout(Duration),

    #[error("malformed scraper output: {0}")]
    ScraperOutput(#[from] serde_json::Error),

    #[error("an ingestion run is already in progress")]
    IngestionBusy,

    #[error("invalid job record: {0}")]
    InvalidRecord(String),

    #[error("scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),
}

impl Error {
    fn is_ingestion_fault(&self) -> bool {
        matches!(
            self,
            Error::Scraper(_) | Error::ScraperTimeout(_) | Error::ScraperOutput(_) | Error::Io(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": "Job not found" }))).into_response()
            }
            Error::IngestionBusy => (
                StatusCode::CONFLICT,
                Json(json!({ "message": "Scraper is already running", "error": self.to_string() })),
            )
                .into_response(),
            e if e.is_ingestion_fault() => {
                tracing::error!("scraper run failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Error running scraper", "error": e.to_string() })),
                )
                    .into_response()
            }
            e => {
                tracing::error!("request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server error" })),
                )
                    .into_response()
            }
        }
    }
}
