//! # cua-core
//!
//! Core traits and types shared by the computer-use browser tools.
//!
//! - [`Tool`] / [`ToolContext`] - the seam every remotely invocable tool implements
//! - [`Part`] - text or image output returned to the caller
//! - [`Sampler`] / [`SamplingRequest`] - asking the caller's model for text
//! - [`CuaError`] / [`Result`] - unified error handling
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait Tool: Send + Sync {
//!     fn name(&self) -> &str;
//!     fn description(&self) -> &str;
//!     async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Vec<Part>>;
//! }
//! ```

pub mod context;
pub mod error;
pub mod sampling;
pub mod tool;
pub mod types;

pub use context::BasicToolContext;
pub use error::{CuaError, Result};
pub use sampling::{DEFAULT_MAX_TOKENS, Sampler, SamplingRequest};
pub use tool::{Tool, ToolContext};
pub use types::{MIME_PNG, Part};

// Re-exported so implementors do not need a direct tokio-util dependency.
pub use tokio_util::sync::CancellationToken;
