//! # cua-server
//!
//! MCP server (stdio) exposing the computer-use browser tools and the
//! research tools.

pub mod cli;
pub mod convert;
pub mod sampler;
pub mod server;

pub use cli::Cli;
pub use sampler::PeerSampler;
pub use server::{CuaServer, serve_stdio};
