use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    conf::{Settings, StoreBackend},
    pkg::internal::{
        scraper::Ingestor,
        store::{JobStore, MemoryJobStore, PgJobStore},
    },
    prelude::Result,
};

pub async fn db_pool(settings: &Settings) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .acquire_timeout(settings.database_connect_timeout())
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobStore>,
    pub ingestor: Arc<Ingestor>,
}

impl AppState {
    /// Connects the configured store; failing to reach it is fatal for the caller.
    pub async fn new(settings: &Settings) -> Result<AppState> {
        let store: Arc<dyn JobStore> = match settings.store_backend {
            StoreBackend::Postgres => {
                let pool = db_pool(settings).await?;
                tracing::info!("connected to database");
                Arc::new(PgJobStore::new(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory job store, jobs are lost on exit");
                Arc::new(MemoryJobStore::new())
            }
        };
        let ingestor = Arc::new(Ingestor::from_settings(store.clone(), settings));
        Ok(AppState { store, ingestor })
    }
}
