//! [`PageDriver`] over the Chrome DevTools Protocol, via chromiumoxide.

use crate::action::MouseButton;
use crate::config::BrowserConfig;
use crate::driver::PageDriver;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, InsertTextParams, MouseButton as CdpMouseButton,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use cua_core::{CuaError, Result};
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;

// CDP modifier bits.
const MOD_ALT: i64 = 1;
const MOD_CONTROL: i64 = 2;
const MOD_META: i64 = 4;
const MOD_SHIFT: i64 = 8;

fn browser_err<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> CuaError {
    move |e| CuaError::Browser(format!("{context}: {e}"))
}

/// Chrome page driven through CDP input events.
///
/// CDP mouse and key events are stateless, so the driver tracks the pointer
/// position, held buttons and held modifiers itself.
pub struct ChromiumDriver {
    browser: Option<Browser>,
    page: Page,
    handler: Option<JoinHandle<()>>,
    cursor: (f64, f64),
    buttons: i64,
    modifiers: i64,
}

impl ChromiumDriver {
    /// Launch Chrome and open a blank page.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut builder =
            ChromeConfig::builder().window_size(config.viewport_width, config.viewport_height);
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(ref path) = config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        for arg in &config.browser_args {
            builder = builder.arg(arg.as_str());
        }
        let chrome_config = builder.build().map_err(browser_err("Failed to build browser config"))?;

        tracing::info!(
            headless = config.headless,
            executable = ?config.chrome_executable,
            "launching chrome"
        );

        let (browser, mut handler) =
            Browser::launch(chrome_config).await.map_err(browser_err("Failed to launch browser"))?;
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let page =
            browser.new_page("about:blank").await.map_err(browser_err("Failed to open page"))?;

        Ok(Self {
            browser: Some(browser),
            page,
            handler: Some(handler),
            cursor: (0.0, 0.0),
            buttons: 0,
            modifiers: 0,
        })
    }

    async fn dispatch_mouse(
        &self,
        kind: DispatchMouseEventType,
        button: Option<MouseButton>,
        click_count: i64,
    ) -> Result<()> {
        let mut builder = DispatchMouseEventParams::builder()
            .r#type(kind)
            .x(self.cursor.0)
            .y(self.cursor.1)
            .modifiers(self.modifiers)
            .buttons(self.buttons);
        if let Some(button) = button {
            builder = builder.button(cdp_button(button)).click_count(click_count);
        }
        let params = builder.build().map_err(CuaError::Browser)?;
        self.page.execute(params).await.map_err(browser_err("Mouse event failed"))?;
        Ok(())
    }

    async fn press(&mut self, button: MouseButton, click_count: i64) -> Result<()> {
        self.buttons |= button_bit(button);
        self.dispatch_mouse(DispatchMouseEventType::MousePressed, Some(button), click_count).await
    }

    async fn release(&mut self, button: MouseButton, click_count: i64) -> Result<()> {
        self.buttons &= !button_bit(button);
        self.dispatch_mouse(DispatchMouseEventType::MouseReleased, Some(button), click_count).await
    }

    async fn dispatch_key(&self, kind: DispatchKeyEventType, def: &KeyDefinition) -> Result<()> {
        let mut builder = DispatchKeyEventParams::builder()
            .r#type(kind.clone())
            .key(def.key.clone())
            .code(def.code.clone())
            .modifiers(self.modifiers);
        if let Some(key_code) = def.key_code {
            builder = builder.windows_virtual_key_code(key_code).native_virtual_key_code(key_code);
        }
        if let Some(location) = def.location {
            builder = builder.location(location);
        }
        if kind == DispatchKeyEventType::KeyDown {
            if let Some(ref text) = def.text {
                builder = builder.text(text.clone()).unmodified_text(text.clone());
            }
        }
        let params = builder.build().map_err(CuaError::Browser)?;
        self.page.execute(params).await.map_err(browser_err("Key event failed"))?;
        Ok(())
    }

    async fn press_key(&mut self, key: &str) -> Result<()> {
        self.key_down(key).await?;
        self.key_up(key).await
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(browser_err("Navigation failed"))?;
        tracing::debug!(url, "navigated");
        Ok(())
    }

    async fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(width as i64)
            .height(height as i64)
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(CuaError::Browser)?;
        self.page.execute(params).await.map_err(browser_err("Failed to set viewport"))?;
        Ok(())
    }

    async fn mouse_move(&mut self, x: i64, y: i64) -> Result<()> {
        self.cursor = (x as f64, y as f64);
        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, None, 0).await
    }

    async fn mouse_down(&mut self, button: MouseButton) -> Result<()> {
        self.press(button, 1).await
    }

    async fn mouse_up(&mut self, button: MouseButton) -> Result<()> {
        self.release(button, 1).await
    }

    async fn click(&mut self, x: i64, y: i64, button: MouseButton) -> Result<()> {
        self.mouse_move(x, y).await?;
        self.press(button, 1).await?;
        self.release(button, 1).await
    }

    async fn double_click(&mut self, x: i64, y: i64) -> Result<()> {
        self.mouse_move(x, y).await?;
        self.press(MouseButton::Left, 1).await?;
        self.release(MouseButton::Left, 1).await?;
        self.press(MouseButton::Left, 2).await?;
        self.release(MouseButton::Left, 2).await
    }

    async fn key_down(&mut self, key: &str) -> Result<()> {
        let def = key_definition(key);
        self.modifiers |= def.modifier;
        self.dispatch_key(key_down_kind(&def, self.modifiers), &def).await
    }

    async fn key_up(&mut self, key: &str) -> Result<()> {
        let def = key_definition(key);
        self.modifiers &= !def.modifier;
        self.dispatch_key(DispatchKeyEventType::KeyUp, &def).await
    }

    async fn release_all(&mut self) -> Result<()> {
        let mut first_err = None;
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            if self.buttons & button_bit(button) != 0 {
                if let Err(e) = self.release(button, 1).await {
                    first_err.get_or_insert(e);
                }
            }
        }
        for key in held_modifier_keys(self.modifiers) {
            if let Err(e) = self.key_up(key).await {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn type_text(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            match ch {
                '\n' | '\r' => self.press_key("Enter").await?,
                '\t' => self.press_key("Tab").await?,
                c if c.is_ascii() && !c.is_ascii_control() => {
                    self.press_key(c.encode_utf8(&mut [0; 4])).await?
                }
                c => {
                    self.page
                        .execute(InsertTextParams::new(c.to_string()))
                        .await
                        .map_err(browser_err("Text insertion failed"))?;
                }
            }
        }
        Ok(())
    }

    async fn evaluate(&mut self, script: &str) -> Result<Value> {
        let result =
            self.page.evaluate(script).await.map_err(browser_err("Script execution failed"))?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn screenshot(&mut self, full_page: bool) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(full_page)
            .build();
        self.page.screenshot(params).await.map_err(browser_err("Screenshot failed"))
    }

    async fn current_url(&mut self) -> Result<Option<String>> {
        self.page.url().await.map_err(browser_err("Failed to get URL"))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut browser) = self.browser.take() {
            browser.close().await.map_err(browser_err("Failed to close browser"))?;
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        Ok(())
    }
}

impl Drop for ChromiumDriver {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        tracing::debug!("ChromiumDriver dropped");
    }
}

/// Text-producing keys go down as `keyDown`; everything else, including any
/// key pressed while Control or Meta is held, as `rawKeyDown`.
fn key_down_kind(def: &KeyDefinition, modifiers: i64) -> DispatchKeyEventType {
    let shortcut = modifiers & (MOD_CONTROL | MOD_META) != 0;
    if def.text.is_some() && !shortcut {
        DispatchKeyEventType::KeyDown
    } else {
        DispatchKeyEventType::RawKeyDown
    }
}

fn held_modifier_keys(modifiers: i64) -> Vec<&'static str> {
    [(MOD_ALT, "Alt"), (MOD_CONTROL, "Control"), (MOD_META, "Meta"), (MOD_SHIFT, "Shift")]
        .into_iter()
        .filter(|(bit, _)| modifiers & bit != 0)
        .map(|(_, key)| key)
        .collect()
}

fn cdp_button(button: MouseButton) -> CdpMouseButton {
    match button {
        MouseButton::Left => CdpMouseButton::Left,
        MouseButton::Right => CdpMouseButton::Right,
        MouseButton::Middle => CdpMouseButton::Middle,
    }
}

fn button_bit(button: MouseButton) -> i64 {
    match button {
        MouseButton::Left => 1,
        MouseButton::Right => 2,
        MouseButton::Middle => 4,
    }
}

/// CDP fields for one native key token.
#[derive(Debug, Clone, PartialEq)]
struct KeyDefinition {
    key: String,
    code: String,
    key_code: Option<i64>,
    text: Option<String>,
    location: Option<i64>,
    modifier: i64,
}

impl KeyDefinition {
    fn named(key: &str, code: &str, key_code: i64) -> Self {
        Self {
            key: key.to_string(),
            code: code.to_string(),
            key_code: Some(key_code),
            text: None,
            location: None,
            modifier: 0,
        }
    }

    fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    fn modifier(mut self, bit: i64) -> Self {
        self.modifier = bit;
        self.location = Some(1);
        self
    }
}

fn key_definition(key: &str) -> KeyDefinition {
    match key {
        "Alt" => KeyDefinition::named("Alt", "AltLeft", 18).modifier(MOD_ALT),
        "Control" => KeyDefinition::named("Control", "ControlLeft", 17).modifier(MOD_CONTROL),
        "Meta" => KeyDefinition::named("Meta", "MetaLeft", 91).modifier(MOD_META),
        "Shift" => KeyDefinition::named("Shift", "ShiftLeft", 16).modifier(MOD_SHIFT),
        "Enter" => KeyDefinition::named("Enter", "Enter", 13).with_text("\r"),
        "Tab" => KeyDefinition::named("Tab", "Tab", 9),
        "Backspace" => KeyDefinition::named("Backspace", "Backspace", 8),
        "Delete" => KeyDefinition::named("Delete", "Delete", 46),
        "Escape" => KeyDefinition::named("Escape", "Escape", 27),
        "Insert" => KeyDefinition::named("Insert", "Insert", 45),
        "CapsLock" => KeyDefinition::named("CapsLock", "CapsLock", 20),
        "Home" => KeyDefinition::named("Home", "Home", 36),
        "End" => KeyDefinition::named("End", "End", 35),
        "PageUp" => KeyDefinition::named("PageUp", "PageUp", 33),
        "PageDown" => KeyDefinition::named("PageDown", "PageDown", 34),
        "ArrowLeft" => KeyDefinition::named("ArrowLeft", "ArrowLeft", 37),
        "ArrowUp" => KeyDefinition::named("ArrowUp", "ArrowUp", 38),
        "ArrowRight" => KeyDefinition::named("ArrowRight", "ArrowRight", 39),
        "ArrowDown" => KeyDefinition::named("ArrowDown", "ArrowDown", 40),
        " " => KeyDefinition::named(" ", "Space", 32).with_text(" "),
        "Divide" => {
            let mut def = KeyDefinition::named("/", "NumpadDivide", 111).with_text("/");
            def.location = Some(3);
            def
        }
        "Backslash" => KeyDefinition::named("\\", "Backslash", 220).with_text("\\"),
        other => function_key(other).unwrap_or_else(|| character_key(other)),
    }
}

fn function_key(key: &str) -> Option<KeyDefinition> {
    let n: i64 = key.strip_prefix('F')?.parse().ok()?;
    (1..=12).contains(&n).then(|| KeyDefinition::named(key, key, 111 + n))
}

fn character_key(key: &str) -> KeyDefinition {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            let upper = c.to_ascii_uppercase();
            let (code, key_code) = if c.is_ascii_alphabetic() {
                (format!("Key{upper}"), Some(upper as i64))
            } else if c.is_ascii_digit() {
                (format!("Digit{c}"), Some(c as i64))
            } else {
                (String::new(), None)
            };
            KeyDefinition {
                key: key.to_string(),
                code,
                key_code,
                text: Some(key.to_string()),
                location: None,
                modifier: 0,
            }
        }
        // Unknown multi-character names go through as bare key identifiers.
        _ => KeyDefinition {
            key: key.to_string(),
            code: key.to_string(),
            key_code: None,
            text: None,
            location: None,
            modifier: 0,
        },
    }
}
