use std::time::Duration;

use tokio::process::Command;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::MediaInfo,
    services::extractor::MediaExtractor,
};

/// Runs the `yt-dlp` executable and reads its JSON dump
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: String,
    timeout: Duration,
}

impl YtDlp {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    fn command(&self, watch_url: &str) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("--dump-single-json")
            .arg("--no-playlist")
            .arg("--skip-download")
            .arg("--no-warnings")
            .arg("--quiet")
            .arg("--")
            .arg(watch_url)
            .kill_on_drop(true);
        command
    }
}

#[async_trait::async_trait]
impl MediaExtractor for YtDlp {
    #[instrument(skip(self))]
    async fn extract(&self, watch_url: &str) -> AppResult<MediaInfo> {
        tracing::debug!(url = %watch_url, binary = %self.binary, "Running yt-dlp");

        let output = tokio::time::timeout(self.timeout, self.command(watch_url).output())
            .await
            .map_err(|_| {
                AppError::Extractor(format!(
                    "yt-dlp timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::Extractor(format!("Failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Extractor(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let info = parse_dump(&output.stdout)?;

        tracing::info!(
            url = %watch_url,
            formats = info.formats.len(),
            extractor = self.name(),
            "Media info extracted"
        );

        Ok(info)
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}

fn parse_dump(stdout: &[u8]) -> AppResult<MediaInfo> {
    serde_json::from_slice(stdout)
        .map_err(|e| AppError::Extractor(format!("Failed to parse yt-dlp JSON: {}", e)))
}
