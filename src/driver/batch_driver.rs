use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{RecordSet, RecordSetError};

use super::client::{file_name, TranscribeClient};

pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8001";

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub endpoint: String,
    pub batch_size: usize,
    pub timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Errors that abort a run before any file is deleted or any row written.
/// Per-file and per-chunk failures are contained as placeholders instead.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("record set: {0}")]
    RecordSet(#[from] RecordSetError),
    #[error("audio directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("failed to list audio directory: {0}")]
    ListDirectory(#[source] std::io::Error),
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Outcome of one driver run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub remaining: usize,
    pub deleted: usize,
}

pub struct BatchDriver {
    config: DriverConfig,
}

impl BatchDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Process every audio file in `directory`, merging results into the
    /// record set at `record_set_path`.
    ///
    /// Chunks are strictly sequential, each a single blocking request with a
    /// hard timeout and no retry. A source file is deleted only when its
    /// result carries both a transcription and a duration, so failed files
    /// stay on disk and a later run retries exactly the unfinished work. The
    /// record set is written back once, after the last chunk.
    pub async fn run(
        &self,
        directory: &Path,
        record_set_path: &Path,
    ) -> Result<RunSummary, DriverError> {
        let mut records = RecordSet::load(record_set_path)?;

        if !directory.is_dir() {
            return Err(DriverError::DirectoryNotFound(directory.to_path_buf()));
        }

        let files = list_audio_files(directory)?;
        let total = files.len();
        let batch_size = self.config.batch_size.max(1);
        let total_chunks = total.div_ceil(batch_size);

        tracing::info!(
            files = total,
            chunks = total_chunks,
            batch_size,
            "Starting decode run"
        );

        let client = TranscribeClient::new(&self.config.endpoint, self.config.timeout)
            .map_err(DriverError::ClientBuild)?;

        let mut summary = RunSummary {
            total,
            ..Default::default()
        };

        for (chunk_idx, chunk) in files.chunks(batch_size).enumerate() {
            tracing::info!(
                chunk = chunk_idx + 1,
                total_chunks,
                files = chunk.len(),
                "Processing chunk"
            );

            let results = client.transcribe_chunk(chunk).await;

            for (path, result) in chunk.iter().zip(&results) {
                records.merge(&file_name(path), result);

                if result.is_success() {
                    summary.succeeded += 1;
                    match tokio::fs::remove_file(path).await {
                        Ok(()) => summary.deleted += 1,
                        Err(e) => {
                            tracing::warn!(path = %path.display(), error = %e, "Failed to delete transcribed file");
                        }
                    }
                }
            }
        }

        summary.remaining = total - summary.succeeded;

        records.save(record_set_path)?;
        tracing::info!(
            succeeded = summary.succeeded,
            remaining = summary.remaining,
            deleted = summary.deleted,
            "Record set updated"
        );

        Ok(summary)
    }
}

fn list_audio_files(directory: &Path) -> Result<Vec<PathBuf>, DriverError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(DriverError::ListDirectory)? {
        let entry = entry.map_err(DriverError::ListDirectory)?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    // Stable ordering keeps chunk boundaries deterministic across runs.
    files.sort();
    Ok(files)
}
