use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::presentation::config::Settings;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub env: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            env: Settings::environment().to_string(),
        }),
    )
}
