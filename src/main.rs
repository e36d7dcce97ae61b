//! Diary-Walker main entry point
//!
//! This is the command-line interface for the Diary-Walker archiver.

use anyhow::Context;
use clap::Parser;
use diary_walker::config::{load_config_with_hash, Config};
use diary_walker::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Diary-Walker: archive a web diary from its newest post back to the first
///
/// Each post's images and body text are saved under
/// `<root>/<author>/【<date>】<title>/`. Without a configuration file the
/// built-in start URL and defaults are used.
#[derive(Parser, Debug)]
#[command(name = "diary-walker")]
#[command(version = "1.0.0")]
#[command(about = "Archive a web diary by walking its previous-entry links", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    tracing::info!(
        "Start URL: {}, output root: {}",
        config.site.start_url,
        config.output.root_dir.display()
    );

    crawl(config).await.context("Archive run aborted")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the progress line on stdout stays on one line.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("diary_walker=info,warn"),
            1 => EnvFilter::new("diary_walker=debug,info"),
            2 => EnvFilter::new("diary_walker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
