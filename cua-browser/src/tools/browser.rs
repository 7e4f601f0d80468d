//! The coordinate-level action tool.

use crate::action::Action;
use crate::dispatcher::Dispatcher;
use crate::session::BrowserSession;
use async_trait::async_trait;
use cua_core::{Part, Result, Tool, ToolContext};
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool performing one browser action and returning the resulting viewport.
pub struct BrowserTool {
    dispatcher: Dispatcher,
}

impl BrowserTool {
    /// Create a new browser tool with a shared browser session.
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { dispatcher: Dispatcher::new(browser) }
    }
}

#[async_trait]
impl Tool for BrowserTool {
    fn name(&self) -> &str {
        "browser"
    }

    fn description(&self) -> &str {
        "Perform one action in the browser (click, double_click, drag, keypress, move, screenshot, scroll, type, wait) and return a screenshot of the viewport afterwards. Coordinates are viewport pixels."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["click", "double_click", "drag", "keypress", "move", "screenshot", "scroll", "type", "wait"],
                    "description": "The action to perform"
                },
                "x": { "type": "integer", "description": "X coordinate" },
                "y": { "type": "integer", "description": "Y coordinate" },
                "button": {
                    "type": "string",
                    "description": "Mouse button for click: left, right or middle (default: left)"
                },
                "path": {
                    "type": "array",
                    "description": "Drag path as [x, y] pairs or {x, y} objects",
                    "items": {}
                },
                "keys": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Keys to press together, e.g. [\"ctrl\", \"a\"]"
                },
                "scroll_x": { "type": "integer", "description": "Horizontal scroll delta (default: 0)" },
                "scroll_y": { "type": "integer", "description": "Vertical scroll delta (default: 0)" },
                "text": { "type": "string", "description": "Text to type" },
                "duration_ms": {
                    "type": "integer",
                    "description": "Wait duration in milliseconds (default: 1000)"
                }
            },
            "required": ["type"]
        }))
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Vec<Part>> {
        let action = Action::from_args(&args)?;
        let observation = self.dispatcher.dispatch(action, &ctx.cancellation_token()).await?;
        Ok(vec![observation.into()])
    }
}
