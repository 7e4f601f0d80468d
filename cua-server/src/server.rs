//! MCP tool surface over the `Tool` implementations.

use crate::convert::{error_to_result, parts_to_content};
use crate::sampler::PeerSampler;
use cua_core::{BasicToolContext, Sampler, Tool, ToolContext};
use cua_telemetry::tool_execute_span;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;

const INSTRUCTIONS: &str = "Drive a shared web browser with `open_url` and `browser` (each browser action returns a fresh screenshot), \
take a screenshot with `screenshot`, delegate tasks with `browser_agent`, and run multi-step web research with `research`.";

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct OpenUrlArgs {
    /// The https URL to open
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct BrowserArgs {
    /// Action kind: click, double_click, drag, keypress, move, screenshot, scroll, type or wait
    #[serde(rename = "type")]
    pub kind: String,
    /// X coordinate in viewport pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    /// Y coordinate in viewport pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    /// Mouse button for click: left, right or middle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
    /// Drag path as [x, y] pairs or {x, y} objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    /// Keys to press together, e.g. ["ctrl", "c"]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    /// Horizontal scroll delta
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_x: Option<i64>,
    /// Vertical scroll delta
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_y: Option<i64>,
    /// Text to type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Wait duration in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct PromptArgs {
    /// Natural-language task or question
    pub prompt: String,
}

/// MCP server exposing a fixed set of tools.
#[derive(Clone)]
pub struct CuaServer {
    tools: Arc<HashMap<String, Arc<dyn Tool>>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CuaServer {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let tools = tools.into_iter().map(|tool| (tool.name().to_string(), tool)).collect();
        Self { tools: Arc::new(tools), tool_router: Self::tool_router() }
    }

    /// Names of the MCP tools this server advertises.
    pub fn advertised_tools(&self) -> Vec<String> {
        self.tool_router.list_all().into_iter().map(|tool| tool.name.to_string()).collect()
    }

    #[tool(description = "Open an https URL in the browser.")]
    async fn open_url(
        &self,
        Parameters(args): Parameters<OpenUrlArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.invoke("open_url", &args, context).await
    }

    #[tool(
        description = "Perform one action in the browser and return a screenshot of the viewport afterwards. Coordinates are viewport pixels."
    )]
    async fn browser(
        &self,
        Parameters(args): Parameters<BrowserArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.invoke("browser", &args, context).await
    }

    #[tool(
        description = "Ask the browser agent to carry out a task. Returns its answer and a screenshot of the current page."
    )]
    async fn browser_agent(
        &self,
        Parameters(args): Parameters<PromptArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.invoke("browser_agent", &args, context).await
    }

    #[tool(description = "Take a screenshot of the visible part of the current page.")]
    async fn screenshot(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.invoke("screenshot", &json!({}), context).await
    }

    #[tool(
        description = "Research a topic: plan searches, refine them until the results are sufficient, and write a report."
    )]
    async fn research(
        &self,
        Parameters(args): Parameters<PromptArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.invoke("research", &args, context).await
    }

    #[tool(description = "Get the current date and time")]
    async fn get_date_time(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.invoke("get_date_time", &json!({}), context).await
    }
}

impl CuaServer {
    async fn invoke<A: Serialize>(
        &self,
        name: &str,
        args: &A,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = serde_json::to_value(args)
            .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {e}"), None))?;

        let mut ctx = BasicToolContext::new(uuid::Uuid::new_v4().to_string())
            .with_cancellation(context.ct.clone());
        if let Some(sampler) = PeerSampler::for_peer(&context.peer) {
            ctx = ctx.with_sampler(Arc::new(sampler) as Arc<dyn Sampler>);
        }
        self.call(name, args, Arc::new(ctx)).await
    }

    /// Run a registered tool and convert its outcome to an MCP result.
    pub async fn call(
        &self,
        name: &str,
        args: Value,
        ctx: Arc<dyn ToolContext>,
    ) -> Result<CallToolResult, McpError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| McpError::invalid_params(format!("Unknown tool '{name}'"), None))?;

        let span = tool_execute_span(name, ctx.call_id());
        match tool.execute(ctx, args).instrument(span).await {
            Ok(parts) => Ok(CallToolResult::success(parts_to_content(parts))),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call failed");
                error_to_result(e)
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for CuaServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = Implementation::from_build_env();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }
}

/// Serve over stdin/stdout until the client disconnects or ctrl-c.
pub async fn serve_stdio(server: CuaServer) -> anyhow::Result<()> {
    let service = server.serve(rmcp::transport::stdio()).await?;
    tracing::info!("serving MCP on stdio");

    tokio::select! {
        quit = service.waiting() => {
            let reason = quit?;
            tracing::info!(?reason, "client disconnected");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cua_core::{CuaError, Part, Result};

    struct StaticTool {
        name: &'static str,
        outcome: fn(&Value) -> Result<Vec<Part>>,
    }

    #[async_trait]
    impl Tool for StaticTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "test tool"
        }

        async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Vec<Part>> {
            (self.outcome)(&args)
        }
    }

    fn server() -> CuaServer {
        CuaServer::new(vec![
            Arc::new(StaticTool {
                name: "open_url",
                outcome: |args| {
                    Ok(vec![Part::text(format!("Opened URL: {}", args["url"].as_str().unwrap_or("")))])
                },
            }) as Arc<dyn Tool>,
            Arc::new(StaticTool {
                name: "browser",
                outcome: |_| Err(CuaError::InvalidArgument("unknown action".into())),
            }),
            Arc::new(StaticTool {
                name: "screenshot",
                outcome: |_| Err(CuaError::SessionNotStarted),
            }),
        ])
    }

    fn ctx() -> Arc<dyn ToolContext> {
        Arc::new(BasicToolContext::new("call-1"))
    }

    #[test]
    fn test_advertised_tools() {
        let mut names = server().advertised_tools();
        names.sort();
        assert_eq!(
            names,
            vec!["browser", "browser_agent", "get_date_time", "open_url", "research", "screenshot"]
        );
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("open_url"));
    }

    #[tokio::test]
    async fn test_call_success() {
        let result =
            server().call("open_url", json!({"url": "https://example.com/"}), ctx()).await.unwrap();
        assert_ne!(result.is_error, Some(true));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["content"][0]["text"], "Opened URL: https://example.com/");
    }

    #[tokio::test]
    async fn test_call_invalid_argument() {
        let err = server().call("browser", json!({"type": "hover"}), ctx()).await.unwrap_err();
        assert!(err.message.contains("unknown action"));
    }

    #[tokio::test]
    async fn test_call_failure_is_tool_error() {
        let result = server().call("screenshot", json!({}), ctx()).await.unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        assert!(server().call("research", json!({}), ctx()).await.is_err());
    }

    #[test]
    fn test_browser_args_forward_only_present_fields() {
        let args: BrowserArgs =
            serde_json::from_value(json!({"type": "click", "x": 1, "y": 2})).unwrap();
        assert_eq!(serde_json::to_value(&args).unwrap(), json!({"type": "click", "x": 1, "y": 2}));
    }
}
