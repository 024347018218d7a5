use anyhow::{anyhow, Result};
use std::sync::Mutex;

use super::base::{GenerationConfig, Provider, Usage};
use super::types::response::GenerateContentResponse;
use crate::tool::Tool;

/// What the mock saw for one `complete` call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub prompt: String,
    pub tool_names: Vec<String>,
    pub generation: Option<GenerationConfig>,
}

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Mutex<Vec<Result<GenerateContentResponse, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<GenerateContentResponse>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Like `new`, where an `Err` is returned from `complete` as a failure
    pub fn with_results(responses: Vec<Result<GenerateContentResponse, String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Provider for MockProvider {
    fn complete(
        &self,
        prompt: &str,
        tools: &[Tool],
        generation: Option<&GenerationConfig>,
    ) -> Result<(GenerateContentResponse, Usage)> {
        self.requests.lock().unwrap().push(RecordedRequest {
            prompt: prompt.to_string(),
            tool_names: tools.iter().map(|t| t.name.clone()).collect(),
            generation: generation.copied(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(anyhow!("mock provider has no responses left"));
        }
        responses
            .remove(0)
            .map(|response| (response, Usage::default()))
            .map_err(|message| anyhow!(message))
    }
}
