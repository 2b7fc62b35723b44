use crate::{conf::Settings, pkg::server::state::AppState, prelude::Result};

pub async fn once(settings: &Settings) -> Result<()> {
    let state = AppState::new(settings).await?;
    let report = state.ingestor.ingest().await?;
    println!(
        "Added {} new jobs ({} already stored, {} failed)",
        report.inserted, report.skipped, report.failed
    );
    Ok(())
}
