//! # Slateline - AI Script Breakdown
//!
//! The main binary for the Slateline breakdown tool.
//!
//! This application provides:
//! - CLI interface for parsing, breakdown, and export (clap)
//! - The multi-pass harvest pipeline over a local Ollama model
//! - Checkpoint, review sheet (CSV) and Movie Magic (.sex) outputs
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                apps/slateline (THE BINARY)                 │
//! │                                                            │
//! │  ┌──────────┐   ┌─────────────┐   ┌────────────────────┐  │
//! │  │   CLI    │   │  Pipeline   │   │  Ollama Client     │  │
//! │  │  (clap)  │   │  (tokio)    │   │  (reqwest)         │  │
//! │  └────┬─────┘   └──────┬──────┘   └─────────┬──────────┘  │
//! │       │                │                    │              │
//! │       └────────────────┼────────────────────┘              │
//! │                        ▼                                   │
//! │               ┌─────────────────┐                          │
//! │               │ slateline-core  │                          │
//! │               │  (THE LOGIC)    │                          │
//! │               └─────────────────┘                          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Deterministic parse (no model)
//! slateline parse heist.fountain
//!
//! # Full breakdown with exports
//! slateline breakdown heist.fountain --sheet --mms
//!
//! # Re-export a checkpoint
//! slateline export -i outputs/heist_checkpoint.json -o heist.sex -t mms
//! ```

use clap::Parser;
use slateline::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — SLATELINE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SLATELINE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slateline=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Slateline startup banner.
fn print_banner() {
    println!(
        r"
  ███████╗██╗      █████╗ ████████╗███████╗██╗     ██╗███╗   ██╗███████╗
  ██╔════╝██║     ██╔══██╗╚══██╔══╝██╔════╝██║     ██║████╗  ██║██╔════╝
  ███████╗██║     ███████║   ██║   █████╗  ██║     ██║██╔██╗ ██║█████╗
  ╚════██║██║     ██╔══██║   ██║   ██╔══╝  ██║     ██║██║╚██╗██║██╔══╝
  ███████║███████╗██║  ██║   ██║   ███████╗███████╗██║██║ ╚████║███████╗
  ╚══════╝╚══════╝╚═╝  ╚═╝   ╚═╝   ╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝╚══════╝

  AI Script Breakdown v{}

  Deterministic Parsing • Local Models • Movie Magic Ready
",
        env!("CARGO_PKG_VERSION")
    );
}
