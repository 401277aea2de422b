use std::sync::Arc;

use crate::application::ports::{TextRecognizer, TranscriptionEngine};
use crate::application::services::ExtractionService;
use crate::presentation::config::Settings;

pub struct AppState<T, R>
where
    T: TranscriptionEngine,
    R: TextRecognizer,
{
    pub extraction_service: Arc<ExtractionService>,
    pub transcription_engine: Arc<T>,
    pub text_recognizer: Arc<R>,
    pub settings: Settings,
}

impl<T, R> Clone for AppState<T, R>
where
    T: TranscriptionEngine,
    R: TextRecognizer,
{
    fn clone(&self) -> Self {
        Self {
            extraction_service: Arc::clone(&self.extraction_service),
            transcription_engine: Arc::clone(&self.transcription_engine),
            text_recognizer: Arc::clone(&self.text_recognizer),
            settings: self.settings.clone(),
        }
    }
}
