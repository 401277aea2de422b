use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{
    Completion, CompletionRequest, CompletionUsage, ModelProvider, ModelProviderError,
};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const MAX_FORWARDED_IMAGES: usize = 10;
const MAX_FORWARDED_BLOCKS: usize = 10;

/// Groq chat-completions adapter. Message content must be a single
/// string, so image URLs and OCR blocks are appended as plain text.
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl GroqProvider {
    pub fn new(api_key: String, default_model: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            default_model,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
}

#[async_trait]
impl ModelProvider for GroqProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ModelProviderError> {
        let model = request
            .model_override
            .as_deref()
            .unwrap_or(&self.default_model);

        let mut parts = vec![request.prompt.clone()];
        for (index, url) in request.images.iter().take(MAX_FORWARDED_IMAGES).enumerate() {
            parts.push(format!("[IMAGE {}]: {url}", index + 1));
        }
        if !request.ocr_blocks.is_empty() {
            let blocks = &request.ocr_blocks[..request.ocr_blocks.len().min(MAX_FORWARDED_BLOCKS)];
            parts.push("OCR_BLOCKS:".to_string());
            parts.push(serde_json::to_string(blocks).unwrap_or_default());
        }
        let content = parts.join("\n\n");

        let body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": "Respond ONLY with valid JSON. No markdown." },
                { "role": "user", "content": content },
            ],
            "temperature": 0,
        });

        tracing::debug!(model = %model, "Sending completion to Groq");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelProviderError::ApiRequestFailed(format!("request: {e}")))?;

        if response.status().as_u16() == 429 {
            return Err(ModelProviderError::RateLimited);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ModelProviderError::ApiRequestFailed(format!(
                "status {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelProviderError::InvalidResponse(format!("parse response: {e}")))?;

        let text = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_else(|| "{}".to_string());

        Ok(Completion {
            text,
            usage: CompletionUsage {
                prompt_tokens: parsed.usage.as_ref().and_then(|u| u.prompt_tokens),
                completion_tokens: parsed.usage.as_ref().and_then(|u| u.completion_tokens),
                model: parsed.model.or_else(|| Some(model.to_string())),
            },
        })
    }
}
