use anyhow::Result;
use reqwest::blocking::Client; // blocking: one turn is processed at a time
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use std::time::Duration;

use super::{
    base::{GenerationConfig, Provider, Usage},
    configs::base::ProviderConfig,
    configs::gemini::GeminiProviderConfig,
    types::{content::Content, response::GenerateContentResponse},
    utils::{check_gemini_error, tools_to_gemini_spec},
};
use crate::errors::ProviderError;
use crate::tool::Tool;

pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        let config = GeminiProviderConfig::from_env()?;
        Self::new(config)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn post(&self, payload: Value) -> Result<Value> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.host.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response.json()?);
        }

        let body: Value = response.json().unwrap_or(Value::Null);
        if let Some(err) = check_gemini_error(&body) {
            return Err(err.into());
        }
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(ProviderError::Server(status.as_u16()).into());
        }
        Err(ProviderError::Request(status.as_u16()).into())
    }
}

fn build_payload(
    prompt: &str,
    tools: &[Tool],
    generation: Option<&GenerationConfig>,
) -> Result<Value> {
    let mut payload = Map::new();
    payload.insert("contents".to_string(), json!([Content::user(prompt)]));

    let tools_spec = tools_to_gemini_spec(tools)?;
    if !tools_spec.is_empty() {
        payload.insert("tools".to_string(), json!(tools_spec));
    }
    if let Some(generation) = generation {
        payload.insert("generationConfig".to_string(), serde_json::to_value(generation)?);
    }

    Ok(Value::Object(payload))
}

impl Provider for GeminiProvider {
    fn complete(
        &self,
        prompt: &str,
        tools: &[Tool],
        generation: Option<&GenerationConfig>,
    ) -> Result<(GenerateContentResponse, Usage)> {
        let payload = build_payload(prompt, tools, generation)?;
        let body = self.post(payload)?;

        if let Some(err) = check_gemini_error(&body) {
            return Err(err.into());
        }

        let response: GenerateContentResponse = serde_json::from_value(body)?;
        let usage = response
            .usage_metadata
            .as_ref()
            .map(Usage::from)
            .unwrap_or_default();

        Ok((response, usage))
    }
}
