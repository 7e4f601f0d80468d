use crate::{Part, Result, Sampler};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// Read-only tools only observe the page and never drive input.
    fn is_read_only(&self) -> bool {
        false
    }
    fn parameters_schema(&self) -> Option<Value> {
        None
    }
    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Vec<Part>>;
}

/// Per-call context handed to a tool by the transport.
pub trait ToolContext: Send + Sync {
    fn call_id(&self) -> &str;

    /// Fires when the caller abandons the request.
    fn cancellation_token(&self) -> CancellationToken {
        CancellationToken::new()
    }

    /// The caller's model, when the transport can reach it.
    fn sampler(&self) -> Option<Arc<dyn Sampler>> {
        None
    }
}
