//! The seam through which tools ask the calling agent's model for text.

use crate::Result;
use async_trait::async_trait;

/// Token ceiling used when a caller does not pick one.
pub const DEFAULT_MAX_TOKENS: u32 = 1_000_000;

/// A single-turn text completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingRequest {
    pub prompt: String,
    /// Model preference forwarded to the caller (e.g. "planner", "writer").
    pub model_hint: Option<String>,
    pub system_prompt: Option<String>,
    pub max_tokens: u32,
}

impl SamplingRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_hint: None,
            system_prompt: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn model_hint(mut self, hint: impl Into<String>) -> Self {
        self.model_hint = Some(hint.into());
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Upstream reasoning capability. Returns the model's free-text answer.
#[async_trait]
pub trait Sampler: Send + Sync {
    async fn sample(&self, request: SamplingRequest) -> Result<String>;
}
