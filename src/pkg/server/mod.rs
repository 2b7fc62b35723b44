pub mod handlers;
pub mod router;
pub mod state;

use crate::{conf::Settings, pkg::internal::schedule::start_scheduler, prelude::Result};
use router::build_routes;
use state::AppState;

pub async fn listen(settings: Settings) -> Result<()> {
    let state = AppState::new(&settings).await?;

    let scheduler = if settings.scrape_on_schedule {
        Some(start_scheduler(state.ingestor.clone(), &settings.scrape_schedule).await?)
    } else {
        tracing::info!("scheduled scraping disabled");
        None
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.listen_port)).await?;
    tracing::info!("Listening at port {}", settings.listen_port);
    tokio::select! {
        r = axum::serve(listener, build_routes(state)) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r)
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing server");
        }
    }

    if let Some(mut scheduler) = scheduler {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("scheduler did not shut down cleanly: {}", e);
        }
    }
    Ok(())
}
