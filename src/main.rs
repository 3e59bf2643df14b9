// Deidentifier - Reversible PII Detection and Substitution
// Copyright (c) 2025 Deidentifier Contributors
// Licensed under the MIT License

use clap::Parser;
use deidentifier::cli::{Cli, Commands};
use deidentifier::config::LoggingConfig;
use deidentifier::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let guard = match init_logging(log_level, &LoggingConfig::default()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Deidentifier - Reversible PII Detection and Substitution"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Process(args) => args.execute(&cli.config),
        Commands::Reverse(args) => args.execute(),
        Commands::Feedback(args) => args.execute(),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
