use std::sync::Arc;

use crate::application::ports::{ModelProvider, ProviderDescriptor};

/// A configured backend: its static descriptor plus the adapter instance.
pub struct RegisteredProvider {
    pub descriptor: ProviderDescriptor,
    pub adapter: Arc<dyn ModelProvider>,
}

/// Ordered, immutable set of configured providers. Order matters: the
/// vision-capability fallback picks the first vision-capable entry.
pub struct ProviderRegistry {
    providers: Vec<RegisteredProvider>,
    default_provider: String,
}

impl ProviderRegistry {
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: Vec::new(),
            default_provider: default_provider.into(),
        }
    }

    pub fn register(mut self, descriptor: ProviderDescriptor, adapter: Arc<dyn ModelProvider>) -> Self {
        self.providers.push(RegisteredProvider { descriptor, adapter });
        self
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredProvider> {
        self.providers.iter().find(|p| p.descriptor.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn first_vision_capable(&self) -> Option<&RegisteredProvider> {
        self.providers.iter().find(|p| p.descriptor.supports_vision)
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter().map(|p| &p.descriptor)
    }
}

/// Friendly model alias exposed to callers, resolved to a concrete
/// (provider, model) pair.
struct ModelAlias {
    alias: &'static str,
    provider: &'static str,
    model: &'static str,
}

const MODEL_ALIASES: &[ModelAlias] = &[
    ModelAlias { alias: "gpt-4o", provider: "openai", model: "gpt-4o" },
    ModelAlias { alias: "gpt-4o-mini", provider: "openai", model: "gpt-4o-mini" },
    ModelAlias { alias: "gpt-5", provider: "openai", model: "gpt-5" },
    ModelAlias {
        alias: "groq-llama-maverick",
        provider: "groq",
        model: "meta-llama/llama-4-maverick-17b-128e-instruct",
    },
    ModelAlias {
        alias: "groq-llama-scout",
        provider: "groq",
        model: "meta-llama/llama-4-scout-17b-16e-instruct",
    },
    ModelAlias { alias: "groq-qwen3-32b", provider: "groq", model: "qwen/qwen3-32b" },
];

/// Model-family prefixes routed to a provider with the hint kept as a
/// literal model override. Checked in order after alias and provider-name
/// resolution.
struct PrefixRule {
    prefix: &'static str,
    provider: &'static str,
}

const PREFIX_RULES: &[PrefixRule] = &[
    PrefixRule { prefix: "gpt-", provider: "openai" },
    PrefixRule { prefix: "meta-llama/", provider: "groq" },
    PrefixRule { prefix: "llama", provider: "groq" },
    PrefixRule { prefix: "qwen", provider: "groq" },
    PrefixRule { prefix: "mixtral", provider: "groq" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSelection {
    pub provider: String,
    pub model_override: Option<String>,
}

/// Resolves a caller preference hint to a configured provider, then
/// enforces the vision-capability requirement. Capability wins over
/// preference; the substitution is silent apart from a debug log line.
pub struct ProviderRouter {
    registry: Arc<ProviderRegistry>,
}

impl ProviderRouter {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn pick(&self, hint: Option<&str>, needs_vision: bool) -> ProviderSelection {
        let mut selection = self.resolve(hint);

        if needs_vision {
            let has_vision = self
                .registry
                .get(&selection.provider)
                .is_some_and(|p| p.descriptor.supports_vision);

            if !has_vision {
                if let Some(alt) = self.registry.first_vision_capable() {
                    tracing::debug!(
                        from = %selection.provider,
                        to = %alt.descriptor.name,
                        "provider lacks vision, substituting"
                    );
                    selection = ProviderSelection {
                        provider: alt.descriptor.name.clone(),
                        model_override: None,
                    };
                }
            }
        }

        selection
    }

    fn resolve(&self, hint: Option<&str>) -> ProviderSelection {
        let fallback = ProviderSelection {
            provider: self.registry.default_provider().to_string(),
            model_override: None,
        };

        let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) else {
            return fallback;
        };

        for alias in MODEL_ALIASES {
            if hint == alias.alias && self.registry.contains(alias.provider) {
                return ProviderSelection {
                    provider: alias.provider.to_string(),
                    model_override: Some(alias.model.to_string()),
                };
            }
        }

        if self.registry.contains(hint) {
            return ProviderSelection {
                provider: hint.to_string(),
                model_override: None,
            };
        }

        let lowered = hint.to_lowercase();
        for rule in PREFIX_RULES {
            if lowered.starts_with(rule.prefix) && self.registry.contains(rule.provider) {
                return ProviderSelection {
                    provider: rule.provider.to_string(),
                    model_override: Some(hint.to_string()),
                };
            }
        }

        tracing::debug!(hint = %hint, "unknown provider hint, using default");
        fallback
    }
}
