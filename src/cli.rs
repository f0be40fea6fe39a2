//! Command-line interface for recap
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Interview audio summarization service
#[derive(Parser, Debug)]
#[command(name = "recap", version, about = "Interview audio summarization service")]
pub struct Cli {
    /// Subcommand to execute (default: serve)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (-v: debug for recap, -vv: debug everywhere)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Prevent automatic model download if the configured model is missing
    #[arg(long, global = true)]
    pub no_download: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default command)
    Serve {
        /// Listen address override (e.g., 0.0.0.0:8080)
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },

    /// Analyze a local audio file and print the result as JSON
    Analyze {
        /// Audio file to analyze
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Manage Whisper models
    Models {
        /// Action to perform
        #[command(subcommand)]
        action: ModelsAction,
    },

    /// Report compiled backends and configuration status
    Check,
}

/// Model management actions
#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// List available models
    List,
    /// Download and install a model
    Install {
        /// Model name (e.g., base.en, small.en, tiny)
        name: String,
    },
}
