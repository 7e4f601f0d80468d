//! Browser configuration options.

use cua_core::{CuaError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable that switches the browser to headless mode.
pub const HEADLESS_ENV: &str = "HEADLESS";

/// Configuration for the shared browser session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run without a visible window
    pub headless: bool,

    /// Viewport width in pixels
    pub viewport_width: u32,

    /// Viewport height in pixels
    pub viewport_height: u32,

    /// Page opened once at startup
    pub start_url: String,

    /// Default duration of a `wait` action
    pub wait_ms: u64,

    /// Upper bound for a caller-requested `wait`
    pub max_wait_ms: u64,

    /// Upper bound for one dispatched action, including its screenshot
    pub action_timeout_secs: u64,

    /// Chrome/Chromium binary; auto-detected when unset
    pub chrome_executable: Option<String>,

    /// Additional browser arguments
    pub browser_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            viewport_width: 1024,
            viewport_height: 768,
            start_url: "https://www.google.com".to_string(),
            wait_ms: 1_000,
            max_wait_ms: 30_000,
            action_timeout_secs: 60,
            chrome_executable: None,
            browser_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with `HEADLESS=true` honoured.
    pub fn from_env() -> Self {
        let headless = headless_from_env_value(std::env::var(HEADLESS_ENV).ok().as_deref());
        Self::default().headless(headless)
    }

    /// Enable or disable headless mode.
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the viewport size.
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = url.into();
        self
    }

    pub fn wait_ms(mut self, ms: u64) -> Self {
        self.wait_ms = ms;
        self
    }

    pub fn max_wait_ms(mut self, ms: u64) -> Self {
        self.max_wait_ms = ms;
        self
    }

    pub fn action_timeout(mut self, secs: u64) -> Self {
        self.action_timeout_secs = secs;
        self
    }

    pub fn chrome_executable(mut self, path: impl Into<String>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    /// Add a browser argument.
    pub fn add_arg(mut self, arg: impl Into<String>) -> Self {
        self.browser_args.push(arg.into());
        self
    }

    pub fn wait_duration(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn max_wait_duration(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }

    pub fn action_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.action_timeout_secs)
    }

    /// Reject settings the session cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(CuaError::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.start_url.trim().is_empty() {
            return Err(CuaError::Config("start_url is empty".to_string()));
        }
        if self.action_timeout_secs == 0 {
            return Err(CuaError::Config("action_timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn headless_from_env_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
