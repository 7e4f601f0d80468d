//! The one shared browser page.

use crate::chromium::ChromiumDriver;
use crate::config::BrowserConfig;
use crate::driver::PageDriver;
use crate::observation::{self, Observation};
use cua_core::{CuaError, Result};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// A browser session owning at most one page.
///
/// Shared across tools via `Arc<BrowserSession>`. Every operation goes through
/// a single FIFO mutex, so actions from concurrent callers never interleave.
pub struct BrowserSession {
    driver: Mutex<Option<Box<dyn PageDriver>>>,
    config: BrowserConfig,
}

impl BrowserSession {
    /// Create a session without a page.
    ///
    /// Call `start()` (or `attach()` with a custom driver) before use.
    pub fn new(config: BrowserConfig) -> Self {
        Self { driver: Mutex::new(None), config }
    }

    /// Create a browser session with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(BrowserConfig::default())
    }

    /// Launch Chrome and attach its page.
    pub async fn start(&self) -> Result<()> {
        self.config.validate()?;
        if self.is_active().await {
            return Err(CuaError::Session("Browser session already started".to_string()));
        }
        let driver = ChromiumDriver::launch(&self.config).await?;
        self.attach(Box::new(driver)).await
    }

    /// Attach a page: size the viewport, then open the start URL.
    ///
    /// A session holds exactly one page for its lifetime; attaching a second
    /// one fails.
    pub async fn attach(&self, mut driver: Box<dyn PageDriver>) -> Result<()> {
        self.config.validate()?;
        let mut slot = self.driver.lock().await;
        if slot.is_some() {
            return Err(CuaError::Session("Browser session already started".to_string()));
        }

        driver.set_viewport(self.config.viewport_width, self.config.viewport_height).await?;
        driver.goto(&self.config.start_url).await?;

        tracing::info!(
            start_url = %self.config.start_url,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            "browser session started"
        );
        *slot = Some(driver);
        Ok(())
    }

    /// Close the page. Safe to call when nothing is attached.
    pub async fn stop(&self) -> Result<()> {
        let mut slot = self.driver.lock().await;
        if let Some(mut driver) = slot.take() {
            driver.close().await?;
            tracing::info!("browser session stopped");
        }
        Ok(())
    }

    /// Check if the session is active.
    pub async fn is_active(&self) -> bool {
        self.driver.lock().await.is_some()
    }

    /// Get the configuration.
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Exclusive access to the page until the guard is dropped.
    pub async fn lock(&self) -> Result<PageGuard<'_>> {
        let slot = self.driver.lock().await;
        if slot.is_none() {
            return Err(CuaError::SessionNotStarted);
        }
        Ok(PageGuard { slot })
    }

    /// Navigate to a URL.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let mut page = self.lock().await?;
        page.goto(url).await
    }

    /// Capture the visible viewport.
    pub async fn capture(&self) -> Result<Observation> {
        let mut page = self.lock().await?;
        observation::capture(&mut *page).await
    }

    /// Get the current URL.
    pub async fn current_url(&self) -> Result<Option<String>> {
        let mut page = self.lock().await?;
        page.current_url().await
    }
}

/// Exclusive handle on an attached page, released on drop.
pub struct PageGuard<'a> {
    slot: MutexGuard<'a, Option<Box<dyn PageDriver>>>,
}

impl Deref for PageGuard<'_> {
    type Target = dyn PageDriver;

    fn deref(&self) -> &Self::Target {
        match self.slot.as_deref() {
            Some(driver) => driver,
            // Only built by `BrowserSession::lock` over an occupied slot.
            None => unreachable!("page guard over an empty session"),
        }
    }
}

impl DerefMut for PageGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self.slot.as_deref_mut() {
            Some(driver) => driver,
            None => unreachable!("page guard over an empty session"),
        }
    }
}

/// Create a shared browser session.
pub fn shared_session(config: BrowserConfig) -> Arc<BrowserSession> {
    Arc::new(BrowserSession::new(config))
}
