//! # cua-research
//!
//! Tools that lean on the caller's model through [`cua_core::Sampler`]:
//!
//! - `research` - plan searches, run a search/reflection cycle per search,
//!   then write a report
//! - `get_date_time` - the local date and time

mod datetime;
mod research;

pub use datetime::DateTimeTool;
pub use research::{
    DEFAULT_MAX_LOOPS, PlannedSearch, ResearchConfig, ResearchTool, run_research,
    strip_code_fences,
};

use cua_core::Tool;
use std::sync::Arc;

/// `research` (with default settings) and `get_date_time`.
pub fn research_tools() -> Vec<Arc<dyn Tool>> {
    research_tools_with(ResearchConfig::default())
}

pub fn research_tools_with(config: ResearchConfig) -> Vec<Arc<dyn Tool>> {
    vec![Arc::new(ResearchTool::new(config)) as Arc<dyn Tool>, Arc::new(DateTimeTool::new())]
}
