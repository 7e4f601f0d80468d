use anyhow::{Context, Result};
use clap::Parser;
use cua_browser::{BrowserToolset, shared_session};
use cua_research::research_tools_with;
use cua_server::{Cli, CuaServer, serve_stdio};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cua_telemetry::init_telemetry("cua-server", cli.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {e}"))?;

    let config = cli.browser_config();
    tracing::info!(headless = config.headless, start_url = %config.start_url, "starting");

    let session = shared_session(config);
    session.start().await.context("Failed to start browser session")?;

    let mut tools = BrowserToolset::new(session.clone()).all_tools();
    tools.extend(research_tools_with(cli.research_config()));

    let served = serve_stdio(CuaServer::new(tools)).await;

    if let Err(e) = session.stop().await {
        tracing::warn!(error = %e, "failed to close browser");
    }
    served
}
