use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::types::response::{GenerateContentResponse, UsageMetadata};
use crate::tool::Tool;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

impl From<&UsageMetadata> for Usage {
    fn from(metadata: &UsageMetadata) -> Self {
        let input_tokens = metadata.prompt_token_count;
        let output_tokens = metadata.candidates_token_count;
        let total_tokens = metadata
            .total_token_count
            .or_else(|| match (input_tokens, output_tokens) {
                (Some(input), Some(output)) => Some(input + output),
                _ => None,
            });
        Usage::new(input_tokens, output_tokens, total_tokens)
    }
}

/// Sampling parameters attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// A hosted model that turns a prompt into a reply
pub trait Provider {
    /// Generate a reply to a single prompt. `tools` are declared to the
    /// model when non-empty; `generation` falls back to the provider's own
    /// defaults when `None`.
    fn complete(
        &self,
        prompt: &str,
        tools: &[Tool],
        generation: Option<&GenerationConfig>,
    ) -> Result<(GenerateContentResponse, Usage)>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn complete(
        &self,
        prompt: &str,
        tools: &[Tool],
        generation: Option<&GenerationConfig>,
    ) -> Result<(GenerateContentResponse, Usage)> {
        (**self).complete(prompt, tools, generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usage_from_metadata() {
        let usage = Usage::from(&UsageMetadata {
            prompt_token_count: Some(10),
            candidates_token_count: Some(20),
            total_token_count: Some(30),
        });
        assert_eq!(usage, Usage::new(Some(10), Some(20), Some(30)));
    }

    #[test]
    fn test_usage_calculated_total() {
        let usage = Usage::from(&UsageMetadata {
            prompt_token_count: Some(10),
            candidates_token_count: Some(20),
            total_token_count: None,
        });
        assert_eq!(usage.total_tokens, Some(30));

        let usage = Usage::from(&UsageMetadata::default());
        assert_eq!(usage, Usage::default());
    }

    #[test]
    fn test_generation_config_wire_format() -> Result<()> {
        let value = serde_json::to_value(GenerationConfig::default())?;
        assert_eq!(value["maxOutputTokens"], json!(1024));
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        Ok(())
    }
}
