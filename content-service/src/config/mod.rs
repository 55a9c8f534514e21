use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Groq's OpenAI-compatible API root.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Llama 3.3 70B, the model every post is generated with unless overridden.
pub const LLAMA3_70B_INSTRUCT: &str = "llama-3.3-70b-versatile";

pub const DEFAULT_MONGODB_DATABASE: &str = "content_db";

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub llm: LlmConfig,
    /// `None` runs the service without persistence.
    pub mongodb: Option<MongoConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Groq,
    Mock,
}

impl ContentConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider: ProviderKind = get_env("LLM_PROVIDER", Some("groq"), false)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // The mock provider never talks to the API, so it needs no key.
        let api_key = match provider {
            ProviderKind::Groq => get_env("GROQ_API_KEY", None, is_prod)?,
            ProviderKind::Mock => env::var("GROQ_API_KEY").unwrap_or_default(),
        };

        let mongodb = match env::var("MONGODB_URI") {
            Ok(uri) if !uri.trim().is_empty() => Some(MongoConfig {
                uri,
                database: get_env("MONGODB_DATABASE", Some(DEFAULT_MONGODB_DATABASE), false)?,
            }),
            _ => None,
        };

        Ok(ContentConfig {
            common: common_config,
            llm: LlmConfig {
                provider,
                api_key: Secret::new(api_key),
                base_url: get_env("LLM_BASE_URL", Some(DEFAULT_LLM_BASE_URL), false)?,
                model: get_env("LLM_MODEL", Some(LLAMA3_70B_INSTRUCT), false)?,
            },
            mongodb,
        })
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(format!("Invalid LLM provider: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
