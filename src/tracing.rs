//! Tracing initialization.

use crate::config::{LogConfig, LogFormat};
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Initialize tracing. Safe to call multiple times; only the first call counts.
///
/// Logs go to stderr because stdout carries the MCP transport. Under a test
/// runner the level drops to DEBUG and output goes through the test writer.
pub fn init(config: &LogConfig) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let level = if is_test { "debug" } else { config.level.as_str() };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);

        if is_test {
            let _ = builder.compact().with_test_writer().try_init();
            return;
        }

        let result = match config.format {
            LogFormat::Compact => builder.compact().with_writer(std::io::stderr).try_init(),
            LogFormat::Json => builder.json().with_writer(std::io::stderr).try_init(),
        };
        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
