//! EmbedProbe CLI - Main Entry Point
//!
//! Attaches to an embedded video player through WebDriver and reports or
//! asserts its playback state.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{check, snapshot, Target};

/// EmbedProbe - inspect embedded video players over WebDriver
#[derive(Parser)]
#[command(name = "embedprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON config file (defaults to ./config.json when --url is absent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Page embedding the player
    #[arg(long, global = true)]
    url: Option<String>,

    /// WebDriver endpoint
    #[arg(long, env = "EMBEDPROBE_WEBDRIVER", global = true)]
    webdriver: Option<String>,

    /// Run the browser headless
    #[arg(long, global = true)]
    headless: bool,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attach to the player and print its current state
    Snapshot,

    /// Attach to the player and assert behaviors
    Check(check::CheckArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let target = Target {
        config: cli.config,
        url: cli.url,
        webdriver: cli.webdriver,
        headless: cli.headless,
    };
    let config = target.resolve()?;

    match cli.command {
        Commands::Snapshot => snapshot::execute(&config, cli.format).await?,
        Commands::Check(args) => {
            if !check::execute(&config, args, cli.format).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
