use crate::domain::Waveform;

/// Decodes container audio bytes into a mono waveform at the engine's
/// sample rate. Failures are per-file and must not abort batch siblings.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<Waveform, DecodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("resampling failed: {0}")]
    ResamplingFailed(String),
}
