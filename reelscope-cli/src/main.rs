//! Reelscope CLI - Command-line interface
//!
//! Terminal front end over the shared movie store.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use reelscope_core::ReelscopeConfig;
use reelscope_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "reelscope")]
#[command(about = "Browse movies and series from the OMDb catalogue")]
struct Cli {
    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn, global = true)]
    log_level: CliLogLevel,
    /// OMDb API key (defaults to $OMDB_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// API endpoint (defaults to $REELSCOPE_BASE_URL or the public OMDb host)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Directory for the full debug log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())?;

    let mut config = ReelscopeConfig::from_env();
    if let Some(api_key) = cli.api_key {
        config.api.api_key = Some(api_key);
    }
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    commands::handle_command(cli.command, &config).await
}
