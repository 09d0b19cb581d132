use async_trait::async_trait;

use crate::application::ports::{InferenceError, RecognitionEngine};
use crate::domain::{RecognitionOutput, Waveform, WordSpan};

/// Deterministic engine used in scaffold mode and tests.
///
/// Emits a fixed transcript with a single word span ending at the waveform's
/// real duration, so extracted durations line up with the audio length.
pub struct StubRecognitionEngine;

#[async_trait]
impl RecognitionEngine for StubRecognitionEngine {
    async fn recognize_batch(
        &self,
        waveforms: &[Waveform],
    ) -> Result<Vec<RecognitionOutput>, InferenceError> {
        Ok(waveforms
            .iter()
            .map(|waveform| {
                let duration = waveform.duration_seconds();
                RecognitionOutput::new(
                    "STUB TRANSCRIPT".to_string(),
                    vec![WordSpan::new("TRANSCRIPT", 0.0, duration)],
                )
            })
            .collect())
    }
}
