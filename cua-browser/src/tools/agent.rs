//! Hands a task to the caller's model and returns its answer with a fresh
//! screenshot.

use crate::session::BrowserSession;
use async_trait::async_trait;
use cua_core::{CuaError, Part, Result, SamplingRequest, Tool, ToolContext};
use cua_telemetry::sampling_span;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::Instrument;

/// Composite tool: asks the upstream model, then captures the viewport.
///
/// Issues no input primitives of its own.
pub struct BrowserAgentTool {
    browser: Arc<BrowserSession>,
}

impl BrowserAgentTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl Tool for BrowserAgentTool {
    fn name(&self) -> &str {
        "browser_agent"
    }

    fn description(&self) -> &str {
        "Ask the browser agent to carry out a task described in natural language. Returns the agent's answer and a screenshot of the current page."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "What the agent should do"
                }
            },
            "required": ["prompt"]
        }))
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Vec<Part>> {
        let prompt = args
            .get("prompt")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CuaError::InvalidArgument("Missing 'prompt' parameter".to_string()))?;
        let sampler = ctx.sampler().ok_or_else(|| {
            CuaError::Sampling("The client does not support sampling".to_string())
        })?;

        let answer = sampler
            .sample(SamplingRequest::new(prompt))
            .instrument(sampling_span(None))
            .await?;

        let observation = self.browser.capture().await?;
        Ok(vec![Part::text(answer.trim()), observation.into()])
    }
}
