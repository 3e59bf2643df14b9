//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Deidentifier - replace PII in text with reversible placeholders
#[derive(Parser, Debug)]
#[command(name = "deidentifier")]
#[command(version, about, long_about = None)]
#[command(author = "Deidentifier Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "deidentifier.toml",
        env = "DEIDENTIFIER_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DEIDENTIFIER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect PII and replace it with placeholders
    Process(commands::process::ProcessArgs),

    /// Restore originals using a saved session
    Reverse(commands::reverse::ReverseArgs),

    /// Record reviewer feedback on a detection
    Feedback(commands::feedback::FeedbackArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
