use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{InferenceError, RecognitionEngine};
use crate::domain::{RecognitionOutput, Waveform, WordSpan};

/// Recognition engine backed by an OpenAI-compatible transcription endpoint
/// with word-level timestamps.
pub struct RemoteWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl RemoteWhisperEngine {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    async fn recognize_one(&self, waveform: &Waveform) -> Result<RecognitionOutput, InferenceError> {
        let file_part = multipart::Part::bytes(encode_wav(waveform))
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| InferenceError::RequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word");

        tracing::debug!(endpoint = %self.endpoint, "Sending waveform to remote whisper");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| InferenceError::RequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(InferenceError::RequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: RemoteTranscription = response
            .json()
            .await
            .map_err(|e| InferenceError::RequestFailed(format!("parse response: {}", e)))?;

        let spans = result
            .words
            .into_iter()
            .map(|w| WordSpan::new(w.word, w.start, w.end))
            .collect();

        Ok(RecognitionOutput::new(
            result.text.trim().to_string(),
            spans,
        ))
    }
}

#[async_trait]
impl RecognitionEngine for RemoteWhisperEngine {
    async fn recognize_batch(
        &self,
        waveforms: &[Waveform],
    ) -> Result<Vec<RecognitionOutput>, InferenceError> {
        // The contract is all-or-nothing: any clip failing fails the call.
        let mut outputs = Vec::with_capacity(waveforms.len());
        for waveform in waveforms {
            outputs.push(self.recognize_one(waveform).await?);
        }

        tracing::info!(clips = outputs.len(), "Remote whisper batch completed");
        Ok(outputs)
    }
}

#[derive(Deserialize)]
struct RemoteTranscription {
    text: String,
    #[serde(default)]
    words: Vec<RemoteWord>,
}

#[derive(Deserialize)]
struct RemoteWord {
    word: String,
    start: f64,
    end: f64,
}

/// Encode a waveform as 16-bit PCM WAV for upload.
fn encode_wav(waveform: &Waveform) -> Vec<u8> {
    let samples: Vec<i16> = waveform
        .samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect();

    let sample_rate = waveform.sample_rate;
    let byte_rate = sample_rate * 2;
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}
