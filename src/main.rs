use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use formscribe::application::ports::ProviderDescriptor;
use formscribe::application::services::{ExtractionService, PricingTable, ProviderRegistry};
use formscribe::infrastructure::audio::OpenAiWhisperEngine;
use formscribe::infrastructure::llm::{GroqProvider, OpenAiProvider};
use formscribe::infrastructure::observability::{init_tracing, TracingConfig};
use formscribe::infrastructure::vision::ProviderOcrAdapter;
use formscribe::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let openai = Arc::new(OpenAiProvider::new(
        settings.providers.openai.api_key.clone(),
        settings.providers.openai.model.clone(),
        None,
    ));
    let groq = Arc::new(GroqProvider::new(
        settings.providers.groq.api_key.clone(),
        settings.providers.groq.model.clone(),
        None,
    ));

    let registry = Arc::new(
        ProviderRegistry::new(settings.providers.default_provider.clone())
            .register(
                ProviderDescriptor::new("openai", settings.providers.openai.model.clone(), true),
                openai.clone(),
            )
            .register(
                ProviderDescriptor::new("groq", settings.providers.groq.model.clone(), false),
                groq,
            ),
    );

    let extraction_service = Arc::new(ExtractionService::new(registry, PricingTable::builtin()));

    let transcription_engine = Arc::new(OpenAiWhisperEngine::new(
        settings.providers.openai.api_key.clone(),
        settings.transcription.model.clone(),
        None,
    ));
    let text_recognizer = Arc::new(ProviderOcrAdapter::new(openai));

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);

    let state = AppState {
        extraction_service,
        transcription_engine,
        text_recognizer,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
