//! Screenshot tool for capturing the viewport.

use crate::session::BrowserSession;
use async_trait::async_trait;
use cua_core::{Part, Result, Tool, ToolContext};
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool for taking a screenshot of the visible viewport.
pub struct ScreenshotTool {
    browser: Arc<BrowserSession>,
}

impl ScreenshotTool {
    /// Create a new screenshot tool with a shared browser session.
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl Tool for ScreenshotTool {
    fn name(&self) -> &str {
        "screenshot"
    }

    fn description(&self) -> &str {
        "Take a screenshot of the visible part of the current page. Returns a PNG image."
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({ "type": "object", "properties": {} }))
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, _args: Value) -> Result<Vec<Part>> {
        let observation = self.browser.capture().await?;
        Ok(vec![observation.into()])
    }
}
