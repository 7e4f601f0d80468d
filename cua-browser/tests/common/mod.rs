#![allow(dead_code)]

use async_trait::async_trait;
use cua_browser::{BrowserConfig, BrowserSession, MouseButton, PageDriver};
use cua_core::{BasicToolContext, CuaError, Result, ToolContext};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One primitive as seen by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Goto(String),
    SetViewport(u32, u32),
    Move(i64, i64),
    Down(MouseButton),
    Up(MouseButton),
    Click(i64, i64, MouseButton),
    DoubleClick(i64, i64),
    KeyDown(String),
    KeyUp(String),
    Type(String),
    Evaluate(String),
    Screenshot { full_page: bool },
    Close,
}

/// Shared, ordered record of driver events.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn snapshot(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// A fake page that records every primitive and renders a PNG header sized to
/// the viewport.
pub struct RecordingDriver {
    log: EventLog,
    width: u32,
    height: u32,
    url: Option<String>,
    delay: Option<Duration>,
    fail_at: Option<usize>,
    inputs: usize,
    held_buttons: Vec<MouseButton>,
    held_keys: Vec<String>,
}

impl RecordingDriver {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            width: 0,
            height: 0,
            url: None,
            delay: None,
            fail_at: None,
            inputs: 0,
            held_buttons: Vec::new(),
            held_keys: Vec::new(),
        }
    }

    /// Sleep this long inside every input primitive.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the `n`th input primitive (1-based) with a browser error instead
    /// of recording it.
    pub fn fail_on(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    async fn record(&mut self, event: Event) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.inputs += 1;
        if self.fail_at == Some(self.inputs) {
            return Err(CuaError::Browser(format!("input {} failed", self.inputs)));
        }
        self.log.push(event);
        Ok(())
    }
}

#[async_trait]
impl PageDriver for RecordingDriver {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.url = Some(url.to_string());
        self.log.push(Event::Goto(url.to_string()));
        Ok(())
    }

    async fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.log.push(Event::SetViewport(width, height));
        Ok(())
    }

    async fn mouse_move(&mut self, x: i64, y: i64) -> Result<()> {
        self.record(Event::Move(x, y)).await
    }

    async fn mouse_down(&mut self, button: MouseButton) -> Result<()> {
        self.record(Event::Down(button)).await?;
        self.held_buttons.push(button);
        Ok(())
    }

    async fn mouse_up(&mut self, button: MouseButton) -> Result<()> {
        self.record(Event::Up(button)).await?;
        self.held_buttons.retain(|b| *b != button);
        Ok(())
    }

    async fn click(&mut self, x: i64, y: i64, button: MouseButton) -> Result<()> {
        self.record(Event::Click(x, y, button)).await
    }

    async fn double_click(&mut self, x: i64, y: i64) -> Result<()> {
        self.record(Event::DoubleClick(x, y)).await
    }

    async fn key_down(&mut self, key: &str) -> Result<()> {
        self.record(Event::KeyDown(key.to_string())).await?;
        self.held_keys.push(key.to_string());
        Ok(())
    }

    async fn key_up(&mut self, key: &str) -> Result<()> {
        self.record(Event::KeyUp(key.to_string())).await?;
        self.held_keys.retain(|k| k != key);
        Ok(())
    }

    async fn type_text(&mut self, text: &str) -> Result<()> {
        self.record(Event::Type(text.to_string())).await
    }

    async fn evaluate(&mut self, script: &str) -> Result<Value> {
        self.record(Event::Evaluate(script.to_string())).await?;
        Ok(Value::Null)
    }

    async fn release_all(&mut self) -> Result<()> {
        for button in std::mem::take(&mut self.held_buttons) {
            self.log.push(Event::Up(button));
        }
        for key in std::mem::take(&mut self.held_keys).into_iter().rev() {
            self.log.push(Event::KeyUp(key));
        }
        Ok(())
    }

    async fn screenshot(&mut self, full_page: bool) -> Result<Vec<u8>> {
        self.log.push(Event::Screenshot { full_page });
        Ok(fake_png(self.width, self.height, self.url.as_deref().unwrap_or_default()))
    }

    async fn current_url(&mut self) -> Result<Option<String>> {
        Ok(self.url.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.log.push(Event::Close);
        Ok(())
    }
}

/// PNG signature and IHDR chunk, followed by the page URL as a stand-in for
/// pixel data.
pub fn fake_png(width: u32, height: u32, url: &str) -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    data.extend_from_slice(url.as_bytes());
    data
}

pub fn test_config() -> BrowserConfig {
    BrowserConfig::new().start_url("https://start.test/")
}

/// A session with a recording page attached and the startup events drained.
pub async fn attached_session(config: BrowserConfig) -> (Arc<BrowserSession>, EventLog) {
    attached_session_with(config, |driver| driver).await
}

pub async fn attached_session_with(
    config: BrowserConfig,
    build: impl FnOnce(RecordingDriver) -> RecordingDriver,
) -> (Arc<BrowserSession>, EventLog) {
    let log = EventLog::default();
    let session = Arc::new(BrowserSession::new(config));
    session.attach(Box::new(build(RecordingDriver::new(log.clone())))).await.unwrap();
    log.take();
    (session, log)
}

pub fn ctx() -> Arc<dyn ToolContext> {
    Arc::new(BasicToolContext::new("call-1"))
}
