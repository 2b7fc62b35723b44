use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub listen_port: String,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    pub database_connect_timeout_secs: u64,
    pub store_backend: StoreBackend,
    //scraper
    pub scraper_program: String,
    pub scraper_args: String,
    pub scraper_output: String,
    pub scraper_timeout_secs: u64,
    pub scrape_schedule: String,
    pub scrape_on_schedule: bool,
    //ingestion defaults
    pub job_source: String,
    pub default_searched_title: String,
    pub default_searched_location: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("listen_port", "5000")?
            .set_default("database_url", "postgres://localhost:5432/job_board")?
            .set_default("database_pool_max_connections", 5)?
            .set_default("database_connect_timeout_secs", 8)?
            .set_default("store_backend", "postgres")?
            .set_default("scraper_program", "python3")?
            .set_default("scraper_args", "scraper.py")?
            .set_default("scraper_output", "linkedin_jobs.json")?
            .set_default("scraper_timeout_secs", 1800)?
            .set_default("scrape_schedule", "0 0 */12 * * *")?
            .set_default("scrape_on_schedule", true)?
            .set_default("job_source", "LinkedIn")?
            .set_default("default_searched_title", "Product Manager")?
            .set_default("default_searched_location", "Remote")?
            .add_source(env)
            .build()?;
        conf.try_deserialize()
    }

    pub fn scraper_args(&self) -> Vec<String> {
        self.scraper_args.split_whitespace().map(String::from).collect()
    }

    pub fn scraper_timeout(&self) -> Option<Duration> {
        match self.scraper_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn database_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database_connect_timeout_secs)
    }
}
