use std::sync::Arc;

use crate::application::ports::AudioDecoder;
use crate::application::services::TranscriptionService;

pub struct AppState<D>
where
    D: AudioDecoder,
{
    pub transcription_service: Arc<TranscriptionService<D>>,
}

impl<D> Clone for AppState<D>
where
    D: AudioDecoder,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
        }
    }
}
