use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A capability the model may ask us to execute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// A json schema of the function signature
    pub parameters: Value,
}

impl Tool {
    /// Create a new tool with the given name, description and parameter schema
    pub fn new<N, D>(name: N, description: D, parameters: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Names listed under `required` in the parameter schema
    pub fn required(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// A tool call requested by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// The name of the tool to execute
    pub name: String,
    /// The arguments for the execution
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new<S: Into<String>>(name: S, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Read an argument as text. Absent or null arguments read as an empty
    /// string, other non-string values as their JSON text.
    pub fn text_argument(&self, key: &str) -> String {
        match self.arguments.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_names() {
        let tool = Tool::new(
            "get_weather",
            "Get the weather for a location",
            json!({
                "type": "object",
                "properties": {
                    "location": {"type": "string"},
                    "unit": {"type": "string"}
                },
                "required": ["location"]
            }),
        );
        assert_eq!(tool.required(), vec!["location"]);

        let tool = Tool::new("noop", "Does nothing", json!({"type": "object"}));
        assert!(tool.required().is_empty());
    }

    #[test]
    fn test_text_argument() {
        let arguments = json!({"name": "Dr. Lee", "count": 3, "missing": null});
        let call = ToolCall::new("tool", arguments.as_object().cloned().unwrap());

        assert_eq!(call.text_argument("name"), "Dr. Lee");
        assert_eq!(call.text_argument("count"), "3");
        assert_eq!(call.text_argument("missing"), "");
        assert_eq!(call.text_argument("absent"), "");
    }
}
