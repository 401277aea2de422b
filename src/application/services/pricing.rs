use std::collections::HashMap;

/// USD per 1,000 tokens for one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrice {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

/// Read-only model pricing table, loaded once at startup.
///
/// Lookup is exact first, then case-insensitive; a miss means cost stays
/// unset rather than guessed.
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    prices: HashMap<String, ModelPrice>,
}

impl PricingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default per-model prices shipped with the service.
    pub fn builtin() -> Self {
        Self::new()
            .with_price("gpt-4o", 0.0025, 0.01)
            .with_price("gpt-4o-mini", 0.00015, 0.0006)
            .with_price("gpt-5", 0.00125, 0.001)
            .with_price("meta-llama/llama-4-maverick-17b-128e-instruct", 0.0002, 0.0006)
            .with_price("meta-llama/llama-4-scout-17b-16e-instruct", 0.00011, 0.00034)
            .with_price("qwen/qwen3-32b", 0.00029, 0.00059)
    }

    pub fn with_price(mut self, model: impl Into<String>, input_per_1k: f64, output_per_1k: f64) -> Self {
        self.prices.insert(
            model.into(),
            ModelPrice {
                input_per_1k,
                output_per_1k,
            },
        );
        self
    }

    pub fn lookup(&self, model: &str) -> Option<ModelPrice> {
        if let Some(price) = self.prices.get(model) {
            return Some(*price);
        }
        self.prices
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(model))
            .map(|(_, price)| *price)
    }

    pub fn cost_usd(&self, model: &str, tokens_in: u32, tokens_out: u32) -> Option<f64> {
        self.lookup(model).map(|price| {
            (f64::from(tokens_in) / 1000.0) * price.input_per_1k
                + (f64::from(tokens_out) / 1000.0) * price.output_per_1k
        })
    }
}

/// Rough token estimate used when the backend does not report usage.
pub fn estimate_tokens(text: &str) -> u32 {
    let quarters = text.len().div_ceil(4) as u32;
    quarters.max(1)
}
