mod engine_factory;
mod remote_whisper_engine;
mod stub_engine;

pub use engine_factory::{EngineBuildError, RecognitionEngineFactory, RecognitionProvider};
pub use remote_whisper_engine::RemoteWhisperEngine;
pub use stub_engine::StubRecognitionEngine;
