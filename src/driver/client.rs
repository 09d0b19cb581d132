use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart;

use crate::domain::TranscriptionResult;

/// HTTP client for the transcription service.
///
/// Every failure mode of a chunk call (connect error, timeout, non-2xx
/// status, malformed or length-mismatched body) degrades to a full list of
/// placeholders for the chunk; no retry is attempted.
pub struct TranscribeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TranscribeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/transcribe", base_url.trim_end_matches('/')),
        })
    }

    /// Send one chunk of files, returning exactly one result per path.
    pub async fn transcribe_chunk(&self, paths: &[PathBuf]) -> Vec<TranscriptionResult> {
        let mut form = multipart::Form::new();
        for path in paths {
            // An unreadable file becomes an empty part so the chunk keeps
            // its length; the service answers it with a placeholder.
            let data = match tokio::fs::read(path).await {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read audio file");
                    Vec::new()
                }
            };

            let part = match multipart::Part::bytes(data)
                .file_name(file_name(path))
                .mime_str("audio/mpeg")
            {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to build multipart part");
                    return placeholders(paths.len());
                }
            };
            form = form.part("files", part);
        }

        let response = match self.client.post(&self.endpoint).multipart(form).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                tracing::warn!(files = paths.len(), "Chunk request timed out");
                return placeholders(paths.len());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chunk request failed");
                return placeholders(paths.len());
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Service rejected chunk");
            return placeholders(paths.len());
        }

        match response.json::<Vec<TranscriptionResult>>().await {
            Ok(results) if results.len() == paths.len() => results,
            Ok(results) => {
                tracing::warn!(
                    expected = paths.len(),
                    got = results.len(),
                    "Result count mismatch; dropping chunk"
                );
                placeholders(paths.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse chunk response");
                placeholders(paths.len())
            }
        }
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

fn placeholders(count: usize) -> Vec<TranscriptionResult> {
    vec![TranscriptionResult::placeholder(); count]
}
