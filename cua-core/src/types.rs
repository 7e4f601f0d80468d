use base64::Engine;
use serde::{Deserialize, Serialize};

pub const MIME_PNG: &str = "image/png";

/// One unit of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    Text { text: String },
    Image { mime_type: String, data: Vec<u8> },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn image(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Part::Image { mime_type: mime_type.into(), data }
    }

    /// Returns the text content if this is a Text part, None otherwise
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the raw image bytes if this is an Image part
    pub fn as_image(&self) -> Option<&[u8]> {
        match self {
            Part::Image { data, .. } => Some(data.as_slice()),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Part::Image { mime_type, .. } => Some(mime_type.as_str()),
            _ => None,
        }
    }

    /// Base64 payload of an image part, as the wire protocols expect it.
    pub fn image_base64(&self) -> Option<String> {
        self.as_image().map(|data| base64::engine::general_purpose::STANDARD.encode(data))
    }
}
