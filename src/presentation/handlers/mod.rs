mod extraction_response;
mod health;
mod process_audio;
mod process_image;
mod process_text;

pub use extraction_response::{ErrorResponse, ExtractionResponseBody, MetricsBody};
pub use health::health_handler;
pub use process_audio::process_audio_handler;
pub use process_image::process_image_handler;
pub use process_text::{process_text_handler, ProcessTextRequest};
