mod audio_decoder;
mod index_loader;
mod recognition_engine;

pub use audio_decoder::{AudioDecoder, DecodeError};
pub use index_loader::{validate_schema, BulkReport, IndexLoader, IndexLoaderError};
pub use recognition_engine::{InferenceError, RecognitionEngine};
