//! Navigation tool.

use crate::session::BrowserSession;
use async_trait::async_trait;
use cua_core::{CuaError, Part, Result, Tool, ToolContext};
use serde_json::{Value, json};
use std::sync::Arc;
use url::Url;

/// Tool for navigating the shared page to a URL.
pub struct OpenUrlTool {
    browser: Arc<BrowserSession>,
}

impl OpenUrlTool {
    /// Create a new navigation tool with a shared browser session.
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }
}

/// Parse `raw` and accept only `https` URLs.
pub(crate) fn parse_https_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| CuaError::InvalidArgument(format!("Invalid URL '{raw}': {e}")))?;
    if url.scheme() != "https" {
        return Err(CuaError::InvalidArgument(format!(
            "Only https URLs can be opened, got '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}

#[async_trait]
impl Tool for OpenUrlTool {
    fn name(&self) -> &str {
        "open_url"
    }

    fn description(&self) -> &str {
        "Open an https URL in the browser."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The https URL to open"
                }
            },
            "required": ["url"]
        }))
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Vec<Part>> {
        let raw = args
            .get("url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CuaError::InvalidArgument("Missing 'url' parameter".to_string()))?;
        let url = parse_https_url(raw)?;

        self.browser.navigate(url.as_str()).await?;
        tracing::info!(url = %url, "opened url");

        Ok(vec![Part::text(format!("Opened URL: {url}"))])
    }
}
