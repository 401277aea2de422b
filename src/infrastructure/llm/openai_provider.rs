use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{
    Completion, CompletionRequest, CompletionUsage, ModelProvider, ModelProviderError,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MAX_FORWARDED_BLOCKS: usize = 10;

/// OpenAI chat-completions adapter. Vision-capable: images ride along as
/// `image_url` content parts.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiProvider {
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
impl ModelProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ModelProviderError> {
        let model = request
            .model_override
            .as_deref()
            .unwrap_or(&self.default_model);

        let mut content = vec![json!({ "type": "text", "text": request.prompt })];
        for url in &request.images {
            content.push(json!({ "type": "image_url", "image_url": { "url": url } }));
        }
        if !request.ocr_blocks.is_empty() {
            let blocks = &request.ocr_blocks[..request.ocr_blocks.len().min(MAX_FORWARDED_BLOCKS)];
            let rendered = serde_json::to_string(blocks).unwrap_or_default();
            content.push(json!({ "type": "text", "text": format!("OCR blocks: {rendered}") }));
        }

        let body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": "Respond ONLY with valid JSON. No markdown." },
                { "role": "user", "content": content },
            ],
            "temperature": 1,
        });

        tracing::debug!(model = %model, images = request.images.len(), "Sending completion to OpenAI");

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
