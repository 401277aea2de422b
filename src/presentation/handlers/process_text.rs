use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::application::ports::{TextRecognizer, TranscriptionEngine};
use crate::application::services::ExtractionInput;
use crate::domain::FormSchema;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::extraction_response::{ErrorResponse, ExtractionResponseBody};

#[derive(Deserialize)]
pub struct ProcessTextRequest {
    pub form_id: String,
    pub form_schema: Value,
    pub text: String,
    #[serde(default)]
    pub provider_preference: Option<String>,
}

#[tracing::instrument(skip(state, request), fields(form_id = %request.form_id))]
pub async fn process_text_handler<T, R>(
    State(state): State<AppState<T, R>>,
    Json(request): Json<ProcessTextRequest>,
) -> impl IntoResponse
where
    T: TranscriptionEngine + 'static,
    R: TextRecognizer + 'static,
{
    tracing::debug!(text = %sanitize_prompt(&request.text), "Processing text extraction");

    let schema = match FormSchema::normalize(&request.form_schema) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected malformed schema");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let input = ExtractionInput {
        text: request.text,
        provider_preference: request.provider_preference,
        ..ExtractionInput::default()
    };

    match state.extraction_service.extract(&schema, &input).await {
        Ok(result) => {
            let body = ExtractionResponseBody::new(request.form_id, &schema, result, None, None);
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
