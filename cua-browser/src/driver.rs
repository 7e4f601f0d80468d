//! Primitive automation capability the dispatcher is built on.

use crate::action::MouseButton;
use async_trait::async_trait;
use cua_core::Result;
use serde_json::Value;

/// Low-level operations against one browser page.
///
/// Every call may suspend while the driver talks to the browser and may fail
/// with a driver-level error, which callers propagate unchanged. Methods take
/// `&mut self`: the session hands out exclusive access, and pointer/keyboard
/// state is inherently serial.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&mut self, url: &str) -> Result<()>;

    async fn set_viewport(&mut self, width: u32, height: u32) -> Result<()>;

    async fn mouse_move(&mut self, x: i64, y: i64) -> Result<()>;

    /// Press `button` at the current pointer position.
    async fn mouse_down(&mut self, button: MouseButton) -> Result<()>;

    /// Release `button` at the current pointer position.
    async fn mouse_up(&mut self, button: MouseButton) -> Result<()>;

    async fn click(&mut self, x: i64, y: i64, button: MouseButton) -> Result<()>;

    /// Double-click with the primary button.
    async fn double_click(&mut self, x: i64, y: i64) -> Result<()>;

    /// `key` is a native token such as `Control`, `Enter` or `a`.
    async fn key_down(&mut self, key: &str) -> Result<()>;

    async fn key_up(&mut self, key: &str) -> Result<()>;

    /// Release every button and modifier still held, buttons first.
    ///
    /// Used after an action is interrupted part-way through a press/release
    /// sequence. Keeps going past individual failures.
    async fn release_all(&mut self) -> Result<()>;

    /// Type `text` into whatever currently has focus.
    async fn type_text(&mut self, text: &str) -> Result<()>;

    async fn evaluate(&mut self, script: &str) -> Result<Value>;

    /// PNG screenshot. `full_page = false` limits it to the viewport.
    async fn screenshot(&mut self, full_page: bool) -> Result<Vec<u8>>;

    async fn current_url(&mut self) -> Result<Option<String>>;

    async fn close(&mut self) -> Result<()>;
}
