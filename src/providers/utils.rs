use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashSet;

use crate::errors::{ProviderError, ToolSpecError};
use crate::tool::Tool;

/// Convert internal Tool format to Gemini's `tools` request field
pub fn tools_to_gemini_spec(tools: &[Tool]) -> Result<Vec<Value>, ToolSpecError> {
    if tools.is_empty() {
        return Ok(vec![]);
    }

    let mut tool_names = HashSet::new();
    let mut declarations = Vec::new();

    for tool in tools {
        if !is_valid_function_name(&tool.name) {
            return Err(ToolSpecError::InvalidName(tool.name.clone()));
        }
        if !tool_names.insert(&tool.name) {
            return Err(ToolSpecError::DuplicateName(tool.name.clone()));
        }

        declarations.push(json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }));
    }

    Ok(vec![json!({ "functionDeclarations": declarations })])
}

fn is_valid_function_name(name: &str) -> bool {
    Regex::new(r"^[a-zA-Z0-9_.-]{1,64}$")
        .map(|re| re.is_match(name))
        .unwrap_or(false)
}

/// Interpret the `error` object Gemini returns on failed requests
pub fn check_gemini_error(body: &Value) -> Option<ProviderError> {
    let error = body.get("error")?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string();
    let code = error
        .get("code")
        .and_then(Value::as_u64)
        .and_then(|c| u16::try_from(c).ok())
        .unwrap_or_default();
    let status = error
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN")
        .to_string();

    Some(ProviderError::Api {
        code,
        status,
        message,
    })
}
