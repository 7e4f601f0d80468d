//! The browser tools bundled over one shared session.

use crate::session::BrowserSession;
use crate::tools::*;
use cua_core::Tool;
use std::sync::Arc;

/// Builds every browser tool against the same session.
pub struct BrowserToolset {
    browser: Arc<BrowserSession>,
}

impl BrowserToolset {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }

    /// `open_url`, `browser`, `browser_agent` and `screenshot`.
    pub fn all_tools(&self) -> Vec<Arc<dyn Tool>> {
        vec![
            Arc::new(OpenUrlTool::new(self.browser.clone())) as Arc<dyn Tool>,
            Arc::new(BrowserTool::new(self.browser.clone())),
            Arc::new(BrowserAgentTool::new(self.browser.clone())),
            Arc::new(ScreenshotTool::new(self.browser.clone())),
        ]
    }

    /// Tools that only observe the page.
    pub fn readonly_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.all_tools().into_iter().filter(|t| t.is_read_only()).collect()
    }
}
