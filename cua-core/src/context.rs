use crate::{Sampler, ToolContext};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Plain [`ToolContext`] for in-process callers and tests.
#[derive(Clone)]
pub struct BasicToolContext {
    call_id: String,
    cancel: CancellationToken,
    sampler: Option<Arc<dyn Sampler>>,
}

impl BasicToolContext {
    pub fn new(call_id: impl Into<String>) -> Self {
        Self { call_id: call_id.into(), cancel: CancellationToken::new(), sampler: None }
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn Sampler>) -> Self {
        self.sampler = Some(sampler);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl ToolContext for BasicToolContext {
    fn call_id(&self) -> &str {
        &self.call_id
    }

    fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn sampler(&self) -> Option<Arc<dyn Sampler>> {
        self.sampler.clone()
    }
}
