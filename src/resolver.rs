//! Detects a tool call in a model reply and runs the matching handler.
//!
//! Resolution is single-shot: only the first call to a registered tool in
//! the first candidate is run, and a handler's result is never fed into
//! another tool call.
use crate::booking::{
    book_appointment, book_appointment_tool, BOOK_APPOINTMENT, THERAPIST_NAME, TIME_SLOT,
};
use crate::providers::types::response::GenerateContentResponse;
use crate::tool::ToolCall;

/// The first function call in the first candidate's ordered parts that
/// names a registered tool. Calls to other tools are skipped.
pub fn first_tool_call(response: &GenerateContentResponse) -> Option<ToolCall> {
    let candidate = response.candidates.first()?;
    candidate
        .parts()
        .iter()
        .filter_map(|part| part.function_call.as_ref())
        .find(|call| {
            let registered = is_registered(&call.name);
            if !registered {
                tracing::debug!("Skipping call to unregistered tool {}", call.name);
            }
            registered
        })
        .map(ToolCall::from)
}

fn is_registered(name: &str) -> bool {
    name == BOOK_APPOINTMENT
}

/// Run the handler registered for `call`, if any
pub fn dispatch(call: &ToolCall) -> Option<String> {
    match call.name.as_str() {
        BOOK_APPOINTMENT => {
            warn_missing_arguments(call);
            Some(book_appointment(
                &call.text_argument(THERAPIST_NAME),
                &call.text_argument(TIME_SLOT),
            ))
        }
        other => {
            tracing::debug!("Ignoring call to unregistered tool {}", other);
            None
        }
    }
}

/// Resolve a model reply to the result of the tool it asked for
pub fn resolve(response: &GenerateContentResponse) -> Option<String> {
    let call = first_tool_call(response)?;
    dispatch(&call)
}

// The declaration marks both arguments required but the model is not held to
// it; missing ones are filled with empty strings.
fn warn_missing_arguments(call: &ToolCall) {
    let tool = book_appointment_tool();
    for name in tool.required() {
        if !call.arguments.contains_key(name) {
            tracing::warn!(
                tool = %call.name,
                argument = name,
                "Required argument missing from tool call, using an empty string"
            );
        }
    }
}
