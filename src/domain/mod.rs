mod recognition;
mod record_set;
mod transcript;
mod waveform;

pub use recognition::{RecognitionOutput, WordSpan};
pub use record_set::{RecordSet, RecordSetError, DURATION_COLUMN, FILENAME_COLUMN, TEXT_COLUMN};
pub use transcript::TranscriptionResult;
pub use waveform::{Waveform, ENGINE_SAMPLE_RATE};
