use async_trait::async_trait;

use crate::domain::OcrBlock;

/// Static capabilities of one configured model backend. The set of
/// descriptors is built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    pub name: String,
    pub default_model: String,
    pub supports_vision: bool,
}

impl ProviderDescriptor {
    pub fn new(name: impl Into<String>, default_model: impl Into<String>, supports_vision: bool) -> Self {
        Self {
            name: name.into(),
            default_model: default_model.into(),
            supports_vision,
        }
    }
}

/// One completion call. Images are data URLs; OCR blocks are forwarded as
/// extra context for providers that cannot take image input directly.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub prompt: String,
    pub images: Vec<String>,
    pub ocr_blocks: Vec<OcrBlock>,
    pub model_override: Option<String>,
}

impl CompletionRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Usage as reported by the backend. All fields optional; the orchestrator
/// falls back to estimation when a count is absent.
#[derive(Debug, Clone, Default)]
pub struct CompletionUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub model: Option<String>,
}

impl CompletionUsage {
    pub fn is_reported(&self) -> bool {
        self.prompt_tokens.is_some() || self.completion_tokens.is_some() || self.model.is_some()
    }

    /// Prefer `self` when it carries anything, else fall back.
    pub fn or(self, fallback: Self) -> Self {
        if self.is_reported() {
            self
        } else {
            fallback
        }
    }
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: CompletionUsage,
}

#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ModelProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelProviderError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
