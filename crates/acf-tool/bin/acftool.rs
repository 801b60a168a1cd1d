//! acftool binary entry point.
//!
//! Thin wrapper around the acf-tool library: parses arguments, sets up
//! logging, validates paths and runs the command.

use acf_tool::{ToolConfig, run};
use anyhow::Result;

fn main() -> Result<()> {
    let config = ToolConfig::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;
    run(&config)?;

    Ok(())
}
