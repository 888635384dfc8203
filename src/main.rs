// MediClear - Personal Health Assistant Client
// Copyright (c) 2025 MediClear Contributors
// Licensed under the MIT License

use clap::Parser;
use mediclear::cli::Cli;
use mediclear::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let options = cli.global_options();

    // Configuration errors are reported by the command itself
    let config = options.load_config().unwrap_or_default();
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let logging_guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "MediClear - Personal Health Assistant Client"
    );

    let exit_code = match cli.command.execute(&options).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(logging_guard);
    process::exit(exit_code);
}
