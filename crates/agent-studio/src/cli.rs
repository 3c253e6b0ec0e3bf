//! One-shot CLI mode
//!
//! Reads a single query from stdin, runs it through the full pipeline,
//! and prints the final markdown to stdout. Errors go to stderr.

use studio_core::Manager;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Read one line from stdin and run it through the pipeline.
pub async fn run_cli(manager: &Manager) -> anyhow::Result<()> {
    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    reader.read_line(&mut line).await?;

    let query = line.trim();
    info!(query = %query, "running one-shot query");

    match manager.run(query).await {
        Ok(output) => {
            println!("{output}");
        }
        Err(e) => {
            eprintln!("error: {e}");
        }
    }

    Ok(())
}
