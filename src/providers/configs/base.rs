use std::env;

use crate::errors::ConfigError;

pub trait ProviderConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>
    where
        Self: Sized;

    /// Read an environment variable, falling back to `default` when it is
    /// optional and unset
    fn get_env(
        key: &str,
        required: bool,
        default: Option<String>,
    ) -> Result<Option<String>, ConfigError> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) if !required => Ok(default),
            Err(env::VarError::NotPresent) => Err(ConfigError::MissingVariable(key.to_string())),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidVariable(key.to_string())),
        }
    }
}

/// Credentials pasted into `.env` files often keep their quotes.
pub fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '\'' || c == '"')
}
