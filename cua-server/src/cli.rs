use clap::Parser;
use cua_browser::BrowserConfig;
use cua_research::ResearchConfig;
use cua_telemetry::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "cua-server")]
#[command(about = "Computer-use browser tools over MCP (stdio)", long_about = None)]
pub struct Cli {
    /// Run the browser without a window (also enabled by HEADLESS=true)
    #[arg(long)]
    pub headless: bool,

    /// Page opened at startup
    #[arg(long)]
    pub start_url: Option<String>,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<(u32, u32)>,

    /// Default duration of a `wait` action in milliseconds
    #[arg(long)]
    pub wait_ms: Option<u64>,

    /// Upper bound for a requested `wait` in milliseconds
    #[arg(long)]
    pub max_wait_ms: Option<u64>,

    /// Upper bound for one browser action, including its screenshot
    #[arg(long)]
    pub action_timeout_secs: Option<u64>,

    /// Chrome/Chromium executable
    #[arg(long)]
    pub chrome: Option<String>,

    /// Extra browser argument (repeatable)
    #[arg(long = "browser-arg", allow_hyphen_values = true)]
    pub browser_args: Vec<String>,

    /// Search/reflection rounds per planned search
    #[arg(long, default_value_t = cua_research::DEFAULT_MAX_LOOPS)]
    pub research_max_loops: usize,

    /// Log output format: text or json
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,
}

impl Cli {
    /// `HEADLESS` from the environment, then command-line overrides.
    pub fn browser_config(&self) -> BrowserConfig {
        self.apply(BrowserConfig::from_env())
    }

    fn apply(&self, mut config: BrowserConfig) -> BrowserConfig {
        if self.headless {
            config = config.headless(true);
        }
        if let Some(ref url) = self.start_url {
            config = config.start_url(url.clone());
        }
        if let Some((width, height)) = self.viewport {
            config = config.viewport(width, height);
        }
        if let Some(ms) = self.wait_ms {
            config = config.wait_ms(ms);
        }
        if let Some(ms) = self.max_wait_ms {
            config = config.max_wait_ms(ms);
        }
        if let Some(secs) = self.action_timeout_secs {
            config = config.action_timeout(secs);
        }
        if let Some(ref path) = self.chrome {
            config = config.chrome_executable(path.clone());
        }
        for arg in &self.browser_args {
            config = config.add_arg(arg.clone());
        }
        config
    }

    pub fn research_config(&self) -> ResearchConfig {
        ResearchConfig::default().max_loops(self.research_max_loops)
    }
}

fn parse_viewport(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = width.trim().parse::<u32>().map_err(|e| format!("invalid width: {e}"))?;
    let height = height.trim().parse::<u32>().map_err(|e| format!("invalid height: {e}"))?;
    if width == 0 || height == 0 {
        return Err("viewport dimensions must be positive".to_string());
    }
    Ok((width, height))
}
