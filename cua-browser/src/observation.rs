//! Viewport screenshots returned after every action.

use crate::driver::PageDriver;
use base64::Engine;
use cua_core::{MIME_PNG, Part, Result};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// One freshly captured image of the visible viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    data: Vec<u8>,
    mime_type: &'static str,
}

impl Observation {
    pub fn png(data: Vec<u8>) -> Self {
        Self { data, mime_type: MIME_PNG }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Width and height from the PNG `IHDR` chunk, if the payload has one.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        if self.data.len() < 24 || self.data[..8] != PNG_SIGNATURE || &self.data[12..16] != b"IHDR"
        {
            return None;
        }
        let width = u32::from_be_bytes(self.data[16..20].try_into().ok()?);
        let height = u32::from_be_bytes(self.data[20..24].try_into().ok()?);
        Some((width, height))
    }

    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

impl From<Observation> for Part {
    fn from(observation: Observation) -> Self {
        Part::image(observation.mime_type, observation.data)
    }
}

/// Capture the viewport. Never asks for the full page and never changes page
/// state.
pub async fn capture(driver: &mut dyn PageDriver) -> Result<Observation> {
    let data = driver.screenshot(false).await?;
    tracing::trace!(bytes = data.len(), "captured observation");
    Ok(Observation::png(data))
}
