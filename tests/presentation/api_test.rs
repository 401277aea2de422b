use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use formscribe::application::ports::{
    ProviderDescriptor, Recognition, RecognitionError, TextRecognizer, TranscriptionEngine,
    TranscriptionError,
};
use formscribe::application::services::{ExtractionService, PricingTable, ProviderRegistry};
use formscribe::infrastructure::llm::MockModelProvider;
use formscribe::presentation::{create_router, AppState, Settings};

struct MockTranscriptionEngine;

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _filename: &str,
        _language: Option<&str>,
    ) -> Result<String, TranscriptionError> {
        Ok("Name: Abeni Coker".to_string())
    }
}

struct MockTextRecognizer;

#[async_trait]
impl TextRecognizer for MockTextRecognizer {
    async fn recognize_text(
        &self,
        _image_data: &[u8],
        _filename: &str,
    ) -> Result<Recognition, RecognitionError> {
        Ok(Recognition {
            text: "Name: Abeni Coker".to_string(),
            blocks: Vec::new(),
        })
    }
}

fn app(provider: Arc<MockModelProvider>) -> axum::Router {
    let registry = Arc::new(ProviderRegistry::new("openai").register(
        ProviderDescriptor::new("openai", "gpt-4o", true),
        provider,
    ));
    let state = AppState {
        extraction_service: Arc::new(ExtractionService::new(registry, PricingTable::builtin())),
        transcription_engine: Arc::new(MockTranscriptionEngine),
        text_recognizer: Arc::new(MockTextRecognizer),
        settings: Settings::from_env(),
    };
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_health_request_then_reports_ok() {
    let app = app(Arc::new(MockModelProvider::new()));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn given_text_request_then_returns_extracted_fields_and_metrics() {
    let provider = Arc::new(MockModelProvider::with_responses([
        r#"{"patientName": "Janet Yakubu", "patientAge": 30}"#,
    ]));
    let app = app(provider);

    let payload = json!({
        "form_id": "form-1",
        "form_schema": {
            "fields": [
                { "id": "patientName", "type": "text", "required": true },
                { "id": "patientAge", "type": "number" },
            ]
        },
        "text": "Patient Name: Janet Yakubu\nAge: 30",
    });

    let response = app
        .oneshot(
            Request::post("/process/text")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["form_id"], "form-1");
    assert_eq!(body["extracted"]["patientName"], "Janet Yakubu");
    assert_eq!(body["extracted"]["patientAge"], 30.0);
    assert_eq!(body["missing_required"], json!([]));
    assert_eq!(body["metrics"]["provider"], "openai");
    assert_eq!(body["metrics"]["model"], "gpt-4o");
    assert!(body["metrics"]["tokens_in"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn given_malformed_schema_then_responds_bad_request_before_any_model_call() {
    let provider = Arc::new(MockModelProvider::new());
    let app = app(provider.clone());

    let payload = json!({
        "form_id": "form-1",
        "form_schema": { "title": "no fields key" },
        "text": "whatever",
    });

    let response = app
        .oneshot(
            Request::post("/process/text")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn given_persistently_unparsable_model_then_responds_bad_gateway() {
    let provider = Arc::new(MockModelProvider::with_responses(["not json", "still not"]));
    let app = app(provider.clone());

    let payload = json!({
        "form_id": "form-1",
        "form_schema": { "fields": [ { "id": "age", "type": "number" } ] },
        "text": "Age: 30",
    });

    let response = app
        .oneshot(
            Request::post("/process/text")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn given_request_without_id_header_then_response_carries_generated_request_id() {
    let app = app(Arc::new(MockModelProvider::new()));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
