mod extraction_service;
mod pricing;
mod prompt_builder;
mod provider_router;
mod schema_validator;

pub use extraction_service::{ExtractionError, ExtractionInput, ExtractionService};
pub use pricing::{estimate_tokens, ModelPrice, PricingTable};
pub use prompt_builder::{build_extraction_prompt, build_strict_retry_prompt};
pub use provider_router::{
    ProviderRegistry, ProviderRouter, ProviderSelection, RegisteredProvider,
};
pub use schema_validator::SchemaValidator;
