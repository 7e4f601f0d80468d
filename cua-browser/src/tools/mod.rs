//! Browser tools exposed to remote callers.

mod agent;
mod browser;
mod open;
mod screenshot;

pub use agent::BrowserAgentTool;
pub use browser::BrowserTool;
pub use open::OpenUrlTool;
pub use screenshot::ScreenshotTool;
