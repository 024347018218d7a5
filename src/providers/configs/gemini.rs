use super::base::{strip_quotes, ProviderConfig};
use crate::errors::ConfigError;

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash-8b-latest";

#[derive(Debug, Clone)]
pub struct GeminiProviderConfig {
    pub api_key: String,
    pub host: String,
    pub model: String,
}

impl GeminiProviderConfig {
    pub fn new(api_key: String, host: String, model: String) -> Self {
        Self {
            api_key,
            host,
            model,
        }
    }
}

impl ProviderConfig for GeminiProviderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = Self::get_env("GOOGLE_API_KEY", true, None)?
            .map(|key| strip_quotes(&key).to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingVariable("GOOGLE_API_KEY".to_string()))?;

        let host = Self::get_env("GOOGLE_API_HOST", false, Some(GEMINI_HOST.to_string()))?
            .unwrap_or_else(|| GEMINI_HOST.to_string());

        let model = Self::get_env("MODEL_NAME", false, Some(GEMINI_MODEL.to_string()))?
            .unwrap_or_else(|| GEMINI_MODEL.to_string());

        Ok(Self::new(api_key, host, model))
    }
}
