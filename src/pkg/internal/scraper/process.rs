use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use tokio::process::Command;

use crate::prelude::{Error, Result};

/// External scraper invocation and its side-channel output file.
#[derive(Debug, Clone)]
pub struct ScraperCommand {
    program: String,
    args: Vec<String>,
    output: PathBuf,
    timeout: Option<Duration>,
}

impl ScraperCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>, output: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        ScraperCommand {
            program: program.into(),
            args,
            output: output.into(),
            timeout,
        }
    }

    /// Removes output left behind by an earlier run.
    pub async fn clear_output(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.output).await {
            Ok(()) => {
                tracing::debug!("removed stale scraper output {}", self.output.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Runs the scraper to completion; a non-zero exit is an error.
    pub async fn run(&self) -> Result<()> {
        tracing::info!("running scraper: {} {}", self.program, self.args.join(" "));
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Scraper(format!("failed to start {}: {}", self.program, e)))?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| Error::ScraperTimeout(limit))??,
            None => child.wait_with_output().await?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            tracing::debug!("scraper stdout: {}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            tracing::debug!("scraper stderr: {}", stderr.trim_end());
        }

        if !output.status.success() {
            return Err(Error::Scraper(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    /// Raw records from the output file; a missing file means no records.
    pub async fn read_output(&self) -> Result<Vec<Value>> {
        let raw = match tokio::fs::read_to_string(&self.output).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("no scraper output at {}", self.output.display());
                return Ok(vec![]);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str::<Vec<Value>>(&raw)?)
    }
}
