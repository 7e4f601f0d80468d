//! Subscriber installation.
//!
//! Output always goes to stderr: the MCP stdio transport owns stdout.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

pub type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected 'text' or 'json')")),
        }
    }
}

/// Initialize console logging on stderr.
///
/// `RUST_LOG` overrides the default `info` filter. Only the first call
/// installs a subscriber; later calls are no-ops.
///
/// # Example
/// ```
/// use cua_telemetry::{LogFormat, init_telemetry};
/// init_telemetry("cua-server", LogFormat::Text).expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(service_name: &str, format: LogFormat) -> Result<(), InitError> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = install(service_name, format);
    });
    result
}

fn install(service_name: &str, format: LogFormat) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let text_layer = (format == LogFormat::Text).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
    });
    let json_layer = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
    });

    tracing_subscriber::registry().with(filter).with(text_layer).with(json_layer).try_init()?;

    tracing::info!(service.name = service_name, log.format = ?format, "Telemetry initialized");
    Ok(())
}
