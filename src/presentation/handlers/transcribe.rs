use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::AudioDecoder;
use crate::application::services::NamedAudio;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Transcribe a multipart batch of audio uploads.
///
/// The response is a JSON array with exactly one result per uploaded part,
/// in upload order. A part whose body cannot be read is kept in place as an
/// empty upload so the length/order contract holds.
#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<D>(
    State(state): State<AppState<D>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    D: AudioDecoder + 'static,
{
    let mut files = Vec::new();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                match field.bytes().await {
                    Ok(data) => {
                        tracing::debug!(filename = %filename, bytes = data.len(), "File data received");
                        files.push(NamedAudio {
                            filename,
                            data: data.to_vec(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(filename = %filename, error = %e, "Failed to read upload body");
                        files.push(NamedAudio {
                            filename,
                            data: Vec::new(),
                        });
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart stream");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    }

    tracing::debug!(files = files.len(), "Transcription batch received");

    let results = state.transcription_service.transcribe_batch(&files).await;

    (StatusCode::OK, Json(results)).into_response()
}
