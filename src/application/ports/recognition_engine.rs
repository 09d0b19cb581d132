use async_trait::async_trait;

use crate::domain::{RecognitionOutput, Waveform};

/// Opaque speech-recognition capability.
///
/// Given N waveforms the engine returns N outputs in the same order, or the
/// whole call fails as a unit; partial results are never surfaced.
/// Implementations are constructed once at process startup and shared
/// read-only across requests.
#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    async fn recognize_batch(
        &self,
        waveforms: &[Waveform],
    ) -> Result<Vec<RecognitionOutput>, InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    RequestFailed(String),
    #[error("engine returned {got} results for {expected} inputs")]
    LengthMismatch { expected: usize, got: usize },
}
