//! Ripple - Tag-routed event shipper
//!
//! # Usage
//!
//! ```bash
//! # Run sources and routes (default)
//! ripple
//! ripple --config configs/ripple.toml
//!
//! # Validate a config and print the rule table
//! ripple check -c configs/ripple.toml
//!
//! # Show where tags would go
//! ripple route access.web app.debug
//! ```

mod builder;
mod cmd;
mod logging;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ripple_config::{Config, LogLevel};
use tracing::info;

/// Ripple - Tag-routed event shipper
#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start sources and route their events until interrupted
    Run,

    /// Validate the configuration and build the router
    Check,

    /// Print the route each tag resolves to
    Route(cmd::route::RouteArgs),
}

/// Default config locations, tried in order
const DEFAULT_CONFIG_PATHS: &[&str] = &["configs/ripple.toml", "ripple.toml"];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, source) = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Command::Check) => cmd::check::run(&config, &source),
        Some(Command::Route(args)) => cmd::route::run(&config, args),
        // No subcommand = run (default behavior)
        Some(Command::Run) | None => {
            logging::init_logging(&config.log, cli.log_level)?;
            info!(config = %source, "configuration loaded");
            cmd::run::run(config).await
        }
    }
}

/// Load the explicit config file, else the first default path, else defaults
///
/// Returns the config with a description of where it came from.
fn load_config(explicit: Option<&Path>) -> Result<(Config, String)> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config file not found: {}", path.display());
        }
        let config = Config::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        return Ok((config, path.display().to_string()));
    }

    for path in DEFAULT_CONFIG_PATHS.iter().map(Path::new) {
        if path.exists() {
            let config = Config::from_file(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            return Ok((config, path.display().to_string()));
        }
    }

    Ok((Config::default(), "(defaults)".to_string()))
}
