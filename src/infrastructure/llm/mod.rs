mod groq_provider;
mod mock_provider;
mod openai_provider;

pub use groq_provider::GroqProvider;
pub use mock_provider::MockModelProvider;
pub use openai_provider::OpenAiProvider;
