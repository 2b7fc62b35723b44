use crate::{conf::Settings, pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod migrate;
mod scrape;

#[derive(Parser)]
#[command(about = "job board api and scraper ingestion")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Serve the HTTP api and run scheduled scrapes
    Listen,
    /// Apply database migrations
    Migrate,
    /// Run the scraper once and ingest its output
    Scrape,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    let settings = Settings::new()?;
    match args.command {
        Some(SubCommandType::Listen) => {
            listen(settings).await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply(&settings).await?;
        }
        Some(SubCommandType::Scrape) => {
            scrape::once(&settings).await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
