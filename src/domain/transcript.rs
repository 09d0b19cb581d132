use serde::{Deserialize, Serialize};

/// Wire-level transcription result for one input file.
///
/// `duration` is a string-encoded number of seconds; an empty string in
/// either field marks the file as not (yet) transcribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub transcription: String,
    pub duration: String,
}

impl TranscriptionResult {
    pub fn new(transcription: String, duration: String) -> Self {
        Self {
            transcription,
            duration,
        }
    }

    /// Empty fallback used when a file or a whole batch could not be
    /// processed.
    pub fn placeholder() -> Self {
        Self {
            transcription: String::new(),
            duration: String::new(),
        }
    }

    /// A result counts as successful only when both fields are non-empty.
    pub fn is_success(&self) -> bool {
        !self.transcription.is_empty() && !self.duration.is_empty()
    }
}
