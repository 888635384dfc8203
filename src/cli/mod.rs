//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for MediClear using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use commands::GlobalOptions;

/// MediClear - personal health assistant client
#[derive(Parser, Debug)]
#[command(name = "mediclear")]
#[command(version, about, long_about = None)]
#[command(author = "MediClear Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "mediclear.toml", env = "MEDICLEAR_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "MEDICLEAR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// MediClear API base URL
    #[arg(long, global = true, env = "MEDICLEAR_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            config_path: self.config.clone(),
            api_url: self.api_url.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe symptoms and get an urgency assessment
    Symptoms(commands::symptoms::SymptomsArgs),

    /// Upload a lab report (PDF, JPG or PNG)
    Upload(commands::upload::UploadArgs),

    /// List uploaded records
    Records(commands::records::RecordsArgs),

    /// Show a record with its explanation and trends
    Report(commands::report::ReportArgs),

    /// Ask questions about your records
    Chat(commands::chat::ChatArgs),

    /// Show dashboard statistics
    Dashboard(commands::dashboard::DashboardArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Runs the command and returns its exit code
    pub async fn execute(&self, options: &GlobalOptions) -> anyhow::Result<i32> {
        match self {
            Commands::Symptoms(args) => args.execute(options).await,
            Commands::Upload(args) => args.execute(options).await,
            Commands::Records(args) => args.execute(options).await,
            Commands::Report(args) => args.execute(options).await,
            Commands::Chat(args) => args.execute(options).await,
            Commands::Dashboard(args) => args.execute(options).await,
            Commands::ValidateConfig(args) => args.execute(options).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}
