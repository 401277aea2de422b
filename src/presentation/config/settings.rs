use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub providers: ProviderSettings,
    pub transcription: TranscriptionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub default_provider: String,
    pub openai: BackendSettings,
    pub groq: BackendSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Settings {
    /// Build settings from process environment variables, with the same
    /// defaults the service has always shipped with.
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
            },
            providers: ProviderSettings {
                default_provider: env_or("DEFAULT_PROVIDER", "openai"),
                openai: BackendSettings {
                    api_key: env_or("OPENAI_API_KEY", ""),
                    model: env_or("OPENAI_MODEL", "gpt-4o"),
                },
                groq: BackendSettings {
                    api_key: env_or("GROQ_API_KEY", ""),
                    model: env_or("GROQ_MODEL", "meta-llama/llama-4-maverick-17b-128e-instruct"),
                },
            },
            transcription: TranscriptionSettings {
                model: env_or("WHISPER_MODEL", "whisper-1"),
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info"),
                json_format: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        }
    }

    pub fn environment() -> Environment {
        std::env::var("APP_ENV")
            .ok()
            .and_then(|v| Environment::try_from(v).ok())
            .unwrap_or(Environment::Dev)
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
