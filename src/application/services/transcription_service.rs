use std::sync::Arc;

use crate::application::ports::{AudioDecoder, InferenceError, RecognitionEngine};
use crate::domain::TranscriptionResult;

/// A named audio upload, owned by one request and discarded after decode.
#[derive(Debug, Clone)]
pub struct NamedAudio {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Batch transcription orchestrator.
///
/// Decode failures are isolated per file. All successfully-decoded waveforms
/// go through a single engine invocation; if that call fails, every member
/// of the sub-batch falls back to a placeholder, since an engine failure is
/// not attributable to one file.
pub struct TranscriptionService<D>
where
    D: AudioDecoder,
{
    audio_decoder: Arc<D>,
    engine: Arc<dyn RecognitionEngine>,
}

impl<D> TranscriptionService<D>
where
    D: AudioDecoder,
{
    pub fn new(audio_decoder: Arc<D>, engine: Arc<dyn RecognitionEngine>) -> Self {
        Self {
            audio_decoder,
            engine,
        }
    }

    /// Transcribe a batch of uploads: one result per input, in input order.
    ///
    /// This never fails as a whole; files that could not be processed carry
    /// the empty placeholder result.
    pub async fn transcribe_batch(&self, files: &[NamedAudio]) -> Vec<TranscriptionResult> {
        let mut results = vec![TranscriptionResult::placeholder(); files.len()];

        let mut waveforms = Vec::new();
        let mut positions = Vec::new();
        for (i, file) in files.iter().enumerate() {
            match self.audio_decoder.decode(&file.data) {
                Ok(waveform) => {
                    waveforms.push(waveform);
                    positions.push(i);
                }
                Err(e) => {
                    tracing::warn!(filename = %file.filename, error = %e, "Skipping undecodable file");
                }
            }
        }

        if waveforms.is_empty() {
            return results;
        }

        match self.engine.recognize_batch(&waveforms).await {
            Ok(outputs) if outputs.len() == positions.len() => {
                for (&slot, output) in positions.iter().zip(&outputs) {
                    let duration = output.duration_seconds();
                    results[slot] =
                        TranscriptionResult::new(output.text.clone(), duration.to_string());
                }
                tracing::info!(
                    files = files.len(),
                    transcribed = positions.len(),
                    "Transcription batch completed"
                );
            }
            Ok(outputs) => {
                let e = InferenceError::LengthMismatch {
                    expected: positions.len(),
                    got: outputs.len(),
                };
                tracing::error!(
                    error = %e,
                    "Engine returned a mismatched batch; sub-batch falls back to placeholders"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    files = positions.len(),
                    "Engine call failed; sub-batch falls back to placeholders"
                );
            }
        }

        results
    }
}
