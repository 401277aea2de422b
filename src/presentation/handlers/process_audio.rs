use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::ports::{TextRecognizer, TranscriptionEngine};
use crate::application::services::ExtractionInput;
use crate::domain::FormSchema;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::extraction_response::{ErrorResponse, ExtractionResponseBody};

#[tracing::instrument(skip(state, multipart))]
pub async fn process_audio_handler<T, R>(
    State(state): State<AppState<T, R>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    T: TranscriptionEngine + 'static,
    R: TextRecognizer + 'static,
{
    let mut form_id = None;
    let mut raw_schema = None;
    let mut language = None;
    let mut provider_preference = None;
    let mut audio: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return bad_request(format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "form_id" => form_id = field.text().await.ok(),
            "form_schema" => raw_schema = field.text().await.ok(),
            "language" => language = field.text().await.ok().filter(|l| !l.is_empty()),
            "provider_preference" => {
                provider_preference = field.text().await.ok().filter(|p| !p.is_empty())
            }
            "audio_file" => {
                let filename = field.file_name().unwrap_or("audio").to_string();
                match field.bytes().await {
                    Ok(bytes) => audio = Some((filename, bytes.to_vec())),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read audio bytes");
                        return bad_request(format!("Failed to read audio file: {}", e));
                    }
                }
            }
            _ => {}
        }
    }

    let Some(form_id) = form_id else {
        return bad_request("Missing 'form_id' field".to_string());
    };
    let Some(raw_schema) = raw_schema else {
        return bad_request("Missing 'form_schema' field".to_string());
    };
    let Some((filename, audio_data)) = audio else {
        return bad_request("Missing 'audio_file' upload".to_string());
    };

    let schema = match FormSchema::normalize_str(&raw_schema) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected malformed schema");
            return bad_request(e.to_string());
        }
    };

    let asr_started = Instant::now();
    let transcript = match state
        .transcription_engine
        .transcribe(&audio_data, &filename, language.as_deref())
        .await
    {
        Ok(transcript) => transcript,
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            return (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Transcription error: {}", e),
                }),
            )
                .into_response();
        }
    };
    let asr_ms = asr_started.elapsed().as_millis() as u64;

    tracing::debug!(transcript = %sanitize_prompt(&transcript), asr_ms, "Transcription complete");

    let input = ExtractionInput {
        text: transcript,
        provider_preference,
        ..ExtractionInput::default()
    };

    match state.extraction_service.extract(&schema, &input).await {
        Ok(result) => {
            let body = ExtractionResponseBody::new(form_id, &schema, result, Some(asr_ms), None);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Extraction failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("LLM provider error: {}", e),
                }),
            )
                .into_response()
        }
    }
}

fn bad_request(message: String) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}
