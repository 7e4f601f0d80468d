//! # cua-telemetry
//!
//! Structured logging for the computer-use browser tools, built on `tracing`.
//!
//! ```rust
//! use cua_telemetry::{LogFormat, info, init_telemetry};
//!
//! fn main() -> Result<(), cua_telemetry::InitError> {
//!     init_telemetry("my-service", LogFormat::Text)?;
//!     info!("ready");
//!     Ok(())
//! }
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{Instrument, Span, debug, error, info, instrument, trace, warn};

pub use init::{InitError, LogFormat, init_telemetry};
pub use spans::*;
