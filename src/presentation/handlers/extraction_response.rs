use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{ExtractionResult, FormSchema};

/// Wire shape shared by the text, audio, and image endpoints.
#[derive(Serialize)]
pub struct ExtractionResponseBody {
    pub form_id: String,
    pub extracted: Value,
    pub missing_required: Vec<String>,
    pub metrics: MetricsBody,
}

#[derive(Serialize)]
pub struct MetricsBody {
    pub asr_seconds: Option<f64>,
    pub vision_seconds: Option<f64>,
    pub llm_seconds: Option<f64>,
    pub total_seconds: Option<f64>,
    pub tokens_in: u32,
    pub tokens_out: u32,
    pub cost_usd: Option<f64>,
    pub provider: String,
    pub model: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ExtractionResponseBody {
    pub fn new(
        form_id: String,
        schema: &FormSchema,
        result: ExtractionResult,
        asr_ms: Option<u64>,
        vision_ms: Option<u64>,
    ) -> Self {
        let mut extracted = Map::new();
        for (id, value) in &result.fields {
            let field_type = schema
                .get(id)
                .map(|spec| spec.field_type)
                .unwrap_or(crate::domain::FieldType::Text);
            extracted.insert(id.clone(), value.to_json(field_type));
        }

        let llm_ms = result.usage.elapsed_ms;
        let total_ms = llm_ms + asr_ms.unwrap_or(0) + vision_ms.unwrap_or(0);

        Self {
            form_id,
            extracted: Value::Object(extracted),
            missing_required: result.missing_required,
            metrics: MetricsBody {
                asr_seconds: asr_ms.map(to_seconds),
                vision_seconds: vision_ms.map(to_seconds),
                llm_seconds: Some(to_seconds(llm_ms)),
                total_seconds: Some(to_seconds(total_ms)),
                tokens_in: result.usage.tokens_in,
                tokens_out: result.usage.tokens_out,
                cost_usd: result.usage.cost_usd.map(round_cost),
                provider: result.usage.provider,
                model: result.usage.model,
            },
        }
    }
}

fn to_seconds(ms: u64) -> f64 {
    (ms as f64 / 1000.0 * 100.0).round() / 100.0
}

fn round_cost(cost: f64) -> f64 {
    (cost * 1_000_000.0).round() / 1_000_000.0
}
