use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;

use crate::application::ports::{
    CompletionRequest, ModelProvider, Recognition, RecognitionError, TextRecognizer,
};
use crate::domain::OcrBlock;
use crate::infrastructure::text_processing::parse_json_object;

/// Upper bound on the base64 preview embedded in the OCR prompt, to keep
/// the request payload within provider limits.
const BASE64_PREVIEW_LIMIT: usize = 4096;

/// Runs OCR by forwarding the image to a vision-capable model provider
/// and normalizing its `{"text": ..., "blocks": [...]}` reply. A reply
/// that is not JSON is treated as the full recognized text.
pub struct ProviderOcrAdapter {
    provider: Arc<dyn ModelProvider>,
}

impl ProviderOcrAdapter {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    fn build_prompt(image_data: &[u8], filename: &str) -> String {
        let encoded = general_purpose::STANDARD.encode(image_data);
        let preview = &encoded[..encoded.len().min(BASE64_PREVIEW_LIMIT)];

        format!(
            "You are an OCR assistant. Extract all text from the provided base64-encoded image data. \
             Respond with JSON: {{\"text\": <full_text>, \"blocks\": [{{\"text\": ..., \"bbox\": [x,y,w,h], \"confidence\": 0.9}}, ...]}}\n\
             Image filename: {filename}\n\
             Base64 (truncated preview): {preview}"
        )
    }
}

#[async_trait]
impl TextRecognizer for ProviderOcrAdapter {
    #[tracing::instrument(skip(self, image_data), fields(filename = %filename, bytes = image_data.len()))]
    async fn recognize_text(
        &self,
        image_data: &[u8],
        filename: &str,
    ) -> Result<Recognition, RecognitionError> {
        if image_data.is_empty() {
            return Err(RecognitionError::InvalidImage("empty image payload".to_string()));
        }

        let request = CompletionRequest::from_prompt(Self::build_prompt(image_data, filename));
        let completion = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| RecognitionError::RecognitionFailed(e.to_string()))?;

        let recognition = match parse_json_object(&completion.text) {
            Some(value) => Recognition {
                text: value
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                blocks: value
                    .get("blocks")
                    .and_then(Value::as_array)
                    .map(|blocks| {
                        blocks
                            .iter()
                            .filter_map(|block| serde_json::from_value::<OcrBlock>(block.clone()).ok())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            None => Recognition {
                text: completion.text,
                blocks: Vec::new(),
            },
        };

        tracing::info!(
            chars = recognition.text.len(),
            blocks = recognition.blocks.len(),
            "Recognition completed"
        );

        Ok(recognition)
    }
}
