use async_trait::async_trait;

use crate::domain::OcrBlock;

/// Output of one image recognition call.
#[derive(Debug, Clone, Default)]
pub struct Recognition {
    pub text: String,
    pub blocks: Vec<OcrBlock>,
}

#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize_text(
        &self,
        image_data: &[u8],
        filename: &str,
    ) -> Result<Recognition, RecognitionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),
    #[error("invalid image: {0}")]
    InvalidImage(String),
}
