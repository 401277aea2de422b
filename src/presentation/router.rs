use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{TextRecognizer, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, process_audio_handler, process_image_handler, process_text_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<T, R>(state: AppState<T, R>) -> Router
where
    T: TranscriptionEngine + 'static,
    R: TextRecognizer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/process/text", post(process_text_handler::<T, R>))
        .route("/process/audio", post(process_audio_handler::<T, R>))
        .route("/process/image", post(process_image_handler::<T, R>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
