use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{CompletionRequest, ModelProviderError};
use crate::application::services::prompt_builder::{
    build_extraction_prompt, build_strict_retry_prompt,
};
use crate::application::services::provider_router::{ProviderRegistry, ProviderRouter};
use crate::application::services::pricing::{estimate_tokens, PricingTable};
use crate::application::services::schema_validator::SchemaValidator;
use crate::domain::{ExtractionResult, FieldValue, FormSchema, OcrBlock, UsageMetrics};
use crate::infrastructure::text_processing::{
    extract_clinical_fields, extract_generic_fields, parse_json_object,
};

/// Inputs for one extraction call. The schema must already be normalized.
#[derive(Debug, Clone, Default)]
pub struct ExtractionInput {
    pub text: String,
    pub provider_preference: Option<String>,
    pub needs_vision: bool,
    pub images: Vec<String>,
    pub ocr_blocks: Vec<OcrBlock>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("provider '{0}' is not configured")]
    UnknownProvider(String),
    #[error("model provider error: {0}")]
    Provider(#[from] ModelProviderError),
    #[error("model returned unparsable output after retry")]
    UnparsableModelOutput,
}

/// Drives one extraction request end to end: provider selection, prompt
/// construction, the model call with a single strict-prompt retry on
/// unparsable output, the heuristic passes, the merge, validation, and
/// usage accounting.
///
/// Stateless across requests; holds only the read-only registry and
/// pricing configuration injected at construction time.
pub struct ExtractionService {
    registry: Arc<ProviderRegistry>,
    router: ProviderRouter,
    pricing: PricingTable,
}

impl ExtractionService {
    pub fn new(registry: Arc<ProviderRegistry>, pricing: PricingTable) -> Self {
        let router = ProviderRouter::new(Arc::clone(&registry));
        Self {
            registry,
            router,
            pricing,
        }
    }

    #[tracing::instrument(skip(self, schema, input), fields(fields = schema.len()))]
    pub async fn extract(
        &self,
        schema: &FormSchema,
        input: &ExtractionInput,
    ) -> Result<ExtractionResult, ExtractionError> {
        let selection = self
            .router
            .pick(input.provider_preference.as_deref(), input.needs_vision);
        let provider = self
            .registry
            .get(&selection.provider)
            .ok_or_else(|| ExtractionError::UnknownProvider(selection.provider.clone()))?;

        let prompt = build_extraction_prompt(schema, &input.text);
        let request = CompletionRequest {
            prompt: prompt.clone(),
            images: input.images.clone(),
            ocr_blocks: input.ocr_blocks.clone(),
            model_override: selection.model_override.clone(),
        };

        let started = Instant::now();
        let completion = provider.adapter.complete(&request).await?;

        let (model_output, raw_text, usage) = match parse_json_object(&completion.text) {
            Some(value) => (value, completion.text, completion.usage),
            None => {
                tracing::warn!(
                    provider = %selection.provider,
                    "model output unparsable, retrying with strict prompt"
                );
                let strict_request = CompletionRequest {
                    prompt: build_strict_retry_prompt(schema, &input.text),
                    ..request
                };
                let retry = provider.adapter.complete(&strict_request).await?;
                let usage = retry.usage.or(completion.usage);
                match parse_json_object(&retry.text) {
                    Some(value) => (value, retry.text, usage),
                    None => return Err(ExtractionError::UnparsableModelOutput),
                }
            }
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let generic = extract_generic_fields(&input.text, schema);
        let clinical = extract_clinical_fields(&input.text, schema);

        let mut fields = Vec::with_capacity(schema.len());
        for spec in schema.fields() {
            let from_model = model_output
                .get(&spec.id)
                .map(|value| FieldValue::from_json(value, spec.field_type))
                .unwrap_or(FieldValue::Empty);

            let merged = if !from_model.is_empty() {
                from_model
            } else if let Some(value) = generic.get(&spec.id).filter(|v| !v.is_empty()) {
                value.clone()
            } else if let Some(value) = clinical.get(&spec.id).filter(|v| !v.is_empty()) {
                value.clone()
            } else {
                FieldValue::default_for(spec.field_type)
            };

            fields.push((spec.id.clone(), merged));
        }

        let missing_required = SchemaValidator::new(schema).missing_required(&fields);

        let tokens_in = usage.prompt_tokens.unwrap_or_else(|| estimate_tokens(&prompt));
        let tokens_out = usage
            .completion_tokens
            .unwrap_or_else(|| estimate_tokens(&raw_text));
        let model = usage
            .model
            .or(selection.model_override)
            .unwrap_or_else(|| provider.descriptor.default_model.clone());
        let cost_usd = self.pricing.cost_usd(&model, tokens_in, tokens_out);

        tracing::info!(
            provider = %selection.provider,
            model = %model,
            tokens_in,
            tokens_out,
            elapsed_ms,
            missing = missing_required.len(),
            "extraction complete"
        );

        Ok(ExtractionResult {
            fields,
            missing_required,
            usage: UsageMetrics {
                tokens_in,
                tokens_out,
                cost_usd,
                elapsed_ms,
                provider: selection.provider,
                model,
            },
        })
    }
}
