//! # cua-browser
//!
//! Computer-use browser tools over the Chrome DevTools Protocol (via
//! chromiumoxide).
//!
//! ## Overview
//!
//! A single shared page is driven with coordinate-level actions, the way a
//! computer-use model sees a screen: click here, type this, scroll there.
//! Every action returns a fresh screenshot of the viewport so the caller can
//! decide on the next step.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cua_browser::{BrowserConfig, BrowserSession, BrowserToolset};
//! use std::sync::Arc;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let config = BrowserConfig::from_env().viewport(1024, 768);
//!     let browser = Arc::new(BrowserSession::new(config));
//!     browser.start().await?;
//!
//!     let tools = BrowserToolset::new(browser.clone()).all_tools();
//!     // hand `tools` to a transport
//!
//!     browser.stop().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Available Tools
//!
//! - `open_url` - Navigate to an https URL
//! - `browser` - Perform one action and return a screenshot
//! - `browser_agent` - Delegate a task to the caller's model
//! - `screenshot` - Capture the viewport
//!
//! ## Architecture
//!
//! ```text
//!   BrowserToolset (open_url, browser, browser_agent, screenshot)
//!          │
//!          ▼
//!   Dispatcher ── Action ── keys
//!          │
//!          ▼
//!   BrowserSession (one page, FIFO mutex)
//!          │
//!          ▼
//!   PageDriver ── ChromiumDriver (CDP)
//! ```

pub mod action;
mod chromium;
mod config;
pub mod dispatcher;
pub mod driver;
pub mod keys;
pub mod observation;
mod session;
pub mod tools;
mod toolset;

pub use action::{Action, MouseButton, Point};
pub use chromium::ChromiumDriver;
pub use config::{BrowserConfig, HEADLESS_ENV};
pub use dispatcher::Dispatcher;
pub use driver::PageDriver;
pub use observation::Observation;
pub use session::{BrowserSession, PageGuard, shared_session};
pub use toolset::BrowserToolset;

pub use tools::{BrowserAgentTool, BrowserTool, OpenUrlTool, ScreenshotTool};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::BrowserConfig;
    pub use crate::session::{BrowserSession, shared_session};
    pub use crate::toolset::BrowserToolset;
}
