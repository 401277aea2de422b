mod model_provider;
mod text_recognizer;
mod transcription_engine;

pub use model_provider::{
    Completion, CompletionRequest, CompletionUsage, ModelProvider, ModelProviderError,
    ProviderDescriptor,
};
pub use text_recognizer::{Recognition, RecognitionError, TextRecognizer};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
