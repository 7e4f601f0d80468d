//! Mapping between tool results and MCP wire types.

use cua_core::{CuaError, Part};
use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};

pub fn part_to_content(part: Part) -> Content {
    let encoded = part.image_base64();
    match part {
        Part::Text { text } => Content::text(text),
        Part::Image { mime_type, .. } => Content::image(encoded.unwrap_or_default(), mime_type),
    }
}

pub fn parts_to_content(parts: Vec<Part>) -> Vec<Content> {
    parts.into_iter().map(part_to_content).collect()
}

/// Bad arguments are a protocol error; every other failure is reported to the
/// caller as a tool result with `isError` set.
pub fn error_to_result(error: CuaError) -> Result<CallToolResult, McpError> {
    if error.is_invalid_argument() {
        return Err(McpError::invalid_params(error.to_string(), None));
    }
    Ok(CallToolResult::error(vec![Content::text(error.to_string())]))
}

/// `sampling/createMessage` parameters for a single user message.
pub fn sampling_params(
    prompt: &str,
    model_hint: Option<&str>,
    system_prompt: Option<&str>,
    max_tokens: u32,
) -> Value {
    let mut params = json!({
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": prompt }
        }],
        "maxTokens": max_tokens,
    });
    if let Some(hint) = model_hint {
        params["modelPreferences"] = json!({ "hints": [{ "name": hint }] });
    }
    if let Some(system) = system_prompt {
        params["systemPrompt"] = json!(system);
    }
    params
}

/// Text of a `sampling/createMessage` result.
///
/// Accepts content as a single block or a list of blocks, either at the top
/// level or nested under `message`.
pub fn sampled_text(result: &Value) -> Option<String> {
    let content = result
        .get("content")
        .or_else(|| result.get("message").and_then(|message| message.get("content")))?;
    match content {
        Value::Array(blocks) => blocks.iter().find_map(text_block),
        block => text_block(block),
    }
}

fn text_block(block: &Value) -> Option<String> {
    if block.get("type")?.as_str()? != "text" {
        return None;
    }
    block.get("text")?.as_str().map(str::to_string)
}
