use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::AudioDecoder;
use crate::presentation::handlers::{health_handler, transcribe_handler};
use crate::presentation::state::AppState;

pub fn create_router<D>(state: AppState<D>) -> Router
where
    D: AudioDecoder + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // A chunk of 20 clips can easily outgrow the 2 MB default body limit.
    let body_limit = DefaultBodyLimit::max(256 * 1024 * 1024);

    Router::new()
        .route("/health", get(health_handler))
        .route("/transcribe", post(transcribe_handler::<D>))
        .layer(body_limit)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
