//! Checklist MCP Server - Main Entry Point
//!
//! This is the main entry point for the checklist MCP server application.
//! The actual implementation is in the `checklist_mcp` library.

use anyhow::{Context, Result};
use checklist_mcp::ChecklistServerHandler;
use checklist_mcp::config::Settings;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Checklist MCP Server - stamp checklists with progress via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the checklist data file (JSON)
    file: Option<PathBuf>,

    /// Enable git synchronization on save
    #[arg(long)]
    sync_git: bool,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Settings::default(),
    }
    .with_overrides(args.file, args.sync_git);

    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let Some(data_file) = settings.data_file else {
        anyhow::bail!("No data file given. Pass it as an argument or set data_file in the config");
    };

    tracing::info!(
        path = %data_file.display(),
        sync_git = settings.sync_git,
        "Starting checklist server"
    );
    let handler = ChecklistServerHandler::new(&data_file, settings.sync_git)?;
    serve_stdio(handler).await?;
    Ok(())
}
