use std::sync::Arc;

use crate::application::ports::RecognitionEngine;

use super::remote_whisper_engine::RemoteWhisperEngine;
use super::stub_engine::StubRecognitionEngine;

const DEFAULT_REMOTE_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionProvider {
    Stub,
    Remote,
}

impl RecognitionProvider {
    pub fn parse(s: &str) -> Result<Self, EngineBuildError> {
        match s.to_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "remote" | "whisper" => Ok(Self::Remote),
            other => Err(EngineBuildError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineBuildError {
    #[error("unknown recognition provider: {0}")]
    UnknownProvider(String),
    #[error("API key required for remote recognition engine")]
    MissingApiKey,
}

pub struct RecognitionEngineFactory;

impl RecognitionEngineFactory {
    pub fn create(
        provider: RecognitionProvider,
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Arc<dyn RecognitionEngine>, EngineBuildError> {
        match provider {
            RecognitionProvider::Stub => {
                tracing::info!("Using stub recognition engine");
                Ok(Arc::new(StubRecognitionEngine))
            }
            RecognitionProvider::Remote => {
                let key = api_key.ok_or(EngineBuildError::MissingApiKey)?;
                let base = base_url.unwrap_or_else(|| DEFAULT_REMOTE_BASE_URL.to_string());
                tracing::info!(model, base_url = %base, "Using remote whisper recognition engine");
                Ok(Arc::new(RemoteWhisperEngine::new(&base, model, &key)))
            }
        }
    }
}
