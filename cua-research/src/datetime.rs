use async_trait::async_trait;
use cua_core::{Part, Result, Tool, ToolContext};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Default)]
pub struct DateTimeTool;

impl DateTimeTool {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn describe(now: chrono::DateTime<chrono::Local>) -> String {
    format!("The current date and time is {}", now.format("%Y-%m-%d %H:%M:%S"))
}

#[async_trait]
impl Tool for DateTimeTool {
    fn name(&self) -> &str {
        "get_date_time"
    }

    fn description(&self) -> &str {
        "Get the current date and time"
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({ "type": "object", "properties": {} }))
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, _args: Value) -> Result<Vec<Part>> {
        Ok(vec![Part::text(describe(chrono::Local::now()))])
    }
}
