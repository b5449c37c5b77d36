//! # Slateline CLI Module
//!
//! This module implements the CLI interface for Slateline.
//!
//! ## Available Commands
//!
//! - `parse` - Parse a script and show the scene table (no model calls)
//! - `breakdown` - Run the full AI breakdown pipeline over a script
//! - `export` - Re-export a saved checkpoint (sheet, mms, json)
//! - `init` - Write a default configuration file

mod commands;

use crate::pipeline::PipelineError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Slateline - AI-assisted screenplay breakdowns
///
/// Parses a script into scenes, harvests production elements with a local
/// Ollama model, and exports breakdown sheets for Movie Magic Scheduling.
#[derive(Parser, Debug)]
#[command(name = "slateline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "slateline.toml")]
    pub config: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a script and print the scene table (deterministic, no model)
    Parse {
        /// Path to the script file (.txt, .fountain, .fdx)
        script: PathBuf,
    },

    /// Run the full breakdown pipeline over a script
    Breakdown {
        /// Path to the script file (.txt, .fountain, .fdx)
        script: PathBuf,

        /// First scene number to analyze (inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Last scene number to analyze (inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Override the configured category selection (comma-separated,
        /// e.g. "Props,Vehicles,SFX")
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,

        /// Also write the CSV review sheet
        #[arg(long)]
        sheet: bool,

        /// Also write the Movie Magic .sex exchange file
        #[arg(long)]
        mms: bool,
    },

    /// Re-export a saved checkpoint without re-running the model
    Export {
        /// Path to the checkpoint file
        #[arg(short = 'i', long)]
        checkpoint: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (sheet, mms, json)
        #[arg(short = 't', long, default_value = "sheet")]
        format: String,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), PipelineError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Parse { script } => cmd_parse(&cli.config, &script, json_mode),
        Commands::Breakdown {
            script,
            from,
            to,
            categories,
            sheet,
            mms,
        } => {
            cmd_breakdown(
                &cli.config,
                &script,
                from.as_deref(),
                to.as_deref(),
                categories.as_deref(),
                sheet,
                mms,
                json_mode,
            )
            .await
        }
        Commands::Export {
            checkpoint,
            output,
            format,
        } => cmd_export(&checkpoint, &output, &format),
        Commands::Init { force } => cmd_init(&cli.config, force),
    }
}
