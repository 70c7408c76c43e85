//! Task Tracker MCP Server - Main Entry Point
//!
//! This is the main entry point for the task tracker server application.
//! The actual implementation is in the `task_tracker` library.

use anyhow::Result;
use clap::Parser;
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use task_tracker::{Config, TrackerServerHandler};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Task Tracker MCP Server - projects, deadlines, reminders and CSV import/export over MCP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file (defaults are used if it does not exist)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Log filter, overrides the configured level (e.g. "debug", "task_tracker=trace")
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: &str) {
    // stdout carries the MCP protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(args.log_level.as_deref().unwrap_or(&config.log_level));

    info!(
        version = task_tracker::VERSION,
        config = ?args.config,
        "starting {}",
        task_tracker::APP_NAME
    );

    let handler = TrackerServerHandler::new(config);
    serve_stdio(handler).await?;
    Ok(())
}
