use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::ports::{TextRecognizer, TranscriptionEngine};
use crate::application::services::ExtractionInput;
use crate::domain::FormSchema;
use crate::presentation::state::AppState;

use super::extraction_response::{ErrorResponse, ExtractionResponseBody};

#[tracing::instrument(skip(state, multipart))]
pub async fn process_image_handler<T, R>(
    State(state): State<AppState<T, R>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    T: TranscriptionEngine + 'static,
    R: TextRecognizer + 'static,
{
    let mut form_id = None;
    let mut raw_schema = None;
    let mut use_vision = true;
    let mut provider_preference = None;
    let mut images: Vec<(String, Vec<u8>)> = Vec::new();

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
            "use_vision" => {
                if let Ok(value) = field.text().await {
                    use_vision = matches!(value.to_lowercase().as_str(), "true" | "1" | "yes");
                }
            }
            "provider_preference" => {
                provider_preference = field.text().await.ok().filter(|p| !p.is_empty())
            }
            "images" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                match field.bytes().await {
                    Ok(bytes) => images.push((filename, bytes.to_vec())),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read image bytes");
                        return bad_request(format!("Failed to read image: {}", e));
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
    if images.is_empty() {
        return bad_request("At least one 'images' upload is required".to_string());
    }

    let schema = match FormSchema::normalize_str(&raw_schema) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected malformed schema");
            return bad_request(e.to_string());
        }
    };

    let mut ocr_texts = Vec::with_capacity(images.len());
    let mut all_blocks = Vec::new();
    let mut vision_ms = 0u64;

    for (filename, data) in &images {
        let started = Instant::now();
        match state.text_recognizer.recognize_text(data, filename).await {
            Ok(recognition) => {
                vision_ms += started.elapsed().as_millis() as u64;
                ocr_texts.push(recognition.text);
                all_blocks.extend(recognition.blocks);
            }
            Err(e) => {
                tracing::error!(error = %e, filename = %filename, "Recognition failed");
                return (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse {
                        error: format!("Recognition error: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    }

    let input = ExtractionInput {
        text: ocr_texts.join("\n"),
        provider_preference,
        needs_vision: use_vision,
        ocr_blocks: all_blocks,
        ..ExtractionInput::default()
    };

    match state.extraction_service.extract(&schema, &input).await {
        Ok(result) => {
            let body =
                ExtractionResponseBody::new(form_id, &schema, result, None, Some(vision_ms));
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
