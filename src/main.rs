use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use voxbatch::application::services::TranscriptionService;
use voxbatch::infrastructure::audio::SymphoniaAudioDecoder;
use voxbatch::infrastructure::engine::{RecognitionEngineFactory, RecognitionProvider};
use voxbatch::infrastructure::observability::{init_tracing, TracingConfig};
use voxbatch::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::default();

    init_tracing(TracingConfig::default());

    let provider = RecognitionProvider::parse(&settings.engine.provider)?;
    let engine = RecognitionEngineFactory::create(
        provider,
        &settings.engine.model,
        settings.engine.api_key.clone(),
        settings.engine.base_url.clone(),
    )?;

    let audio_decoder = Arc::new(SymphoniaAudioDecoder);
    let transcription_service = Arc::new(TranscriptionService::new(audio_decoder, engine));

    let state = AppState {
        transcription_service,
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
