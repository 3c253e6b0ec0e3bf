//! agent-studio: Multi-Agent Content Studio main binary
//!
//! Runs a four-stage agent pipeline (researcher, analyst, writer,
//! reviewer) over an LLM completion service, with an optional web
//! search capability for the researcher.
//!
//! Usage:
//!   agent-studio           - Start the web UI server
//!   agent-studio --cli     - Run one query read from stdin
//!   agent-studio --help    - Show help

mod cli;

use std::sync::Arc;

use studio_core::{CompletionClient, Config, Manager, default_team};
use studio_web::{AppState, StudioServer};
use tracing_subscriber::EnvFilter;

/// Run mode
enum RunMode {
    /// Web UI server mode
    Server,
    /// One-shot CLI mode (query read from stdin)
    Cli,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args();

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("agent-studio {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    tracing::info!("Starting agent-studio...");
    tracing::info!("Model: {}", config.llm.model);
    if !config.llm.has_api_key() {
        tracing::warn!("No LLM API key configured; runs will be rejected until one is set");
    }

    let client = CompletionClient::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;
    let search = studio_tools::default_search_provider();
    let team = default_team(&client, Some(search), config.search.max_results);
    let manager = Arc::new(Manager::new(team));

    match mode {
        RunMode::Cli => {
            tracing::info!("Running in CLI mode");
            cli::run_cli(&manager).await
        }
        RunMode::Server => run_server(config, manager).await,
        _ => Ok(()),
    }
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--cli" | "-c" => return RunMode::Cli,
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("agent-studio - Multi-Agent Content Studio");
    println!();
    println!("Usage:");
    println!("  agent-studio           Start the web UI server");
    println!("  agent-studio --cli     Run one query read from stdin");
    println!("  agent-studio --help    Show this help message");
    println!("  agent-studio --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  OPENAI_API_KEY         API key for the completion service");
    println!("  LLM_API_KEY            Alternative API key variable (takes precedence)");
    println!("  LLM_MODEL              Model name (default: gpt-4o-mini)");
    println!("  LLM_PROVIDER           Provider: openai or claude (default: openai)");
    println!("  LLM_BASE_URL           Custom API endpoint");
    println!("  WEB_HOST               Web UI host (default: 127.0.0.1)");
    println!("  WEB_PORT               Web UI port (default: 3000)");
    println!("  SEARCH_MAX_RESULTS     Search snippets per query (default: 5)");
}

/// Run the web UI server
async fn run_server(config: Config, manager: Arc<Manager>) -> anyhow::Result<()> {
    let state = AppState::new(manager, config.llm.has_api_key(), config.llm.model.clone());
    let server = StudioServer::new(config.web.clone(), state);

    tracing::info!("Press Ctrl+C to exit");

    tokio::select! {
        result = server.run() => {
            result.map_err(|e| anyhow::anyhow!("Server error: {}", e))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down...");
        }
    }

    Ok(())
}
