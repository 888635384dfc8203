//! CLI command implementations
//!
//! Each subcommand drives one core component and prints its result. Exit
//! codes: 0 success, 1 operation failure, 2 configuration or validation
//! error, 5 fatal.

pub mod chat;
pub mod dashboard;
pub mod init;
pub mod records;
pub mod report;
pub mod symptoms;
pub mod upload;
pub mod validate;

use crate::adapters::health_api::{HealthGateway, HttpGateway};
use crate::config::{load_config_or_default, MediClearConfig};
use crate::domain::{MediClearError, Result};
use std::sync::Arc;

/// Options shared by every command that talks to the API
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub config_path: String,
    pub api_url: Option<String>,
}

impl GlobalOptions {
    /// Loads the configuration, applying the `--api-url` override last
    pub fn load_config(&self) -> Result<MediClearConfig> {
        let mut config = load_config_or_default(&self.config_path)?;
        if let Some(api_url) = &self.api_url {
            tracing::debug!(api_url = %api_url, "Overriding API base URL from CLI");
            config.api.base_url = api_url.clone();
            config.validate().map_err(MediClearError::Configuration)?;
        }
        Ok(config)
    }

    /// Builds the HTTP gateway from the loaded configuration
    pub fn connect(&self) -> Result<Arc<dyn HealthGateway>> {
        let config = self.load_config()?;
        let gateway = HttpGateway::from_config(&config)?;
        tracing::debug!(base_url = %gateway.base_url(), "Gateway ready");
        Ok(Arc::new(gateway))
    }
}

/// Exit code for a failed operation
pub fn exit_code_for(error: &MediClearError) -> i32 {
    match error {
        MediClearError::Validation(_) | MediClearError::Configuration(_) => 2,
        MediClearError::Io(_) => 5,
        _ => 1,
    }
}

/// Prints the failure and returns its exit code
pub(crate) fn report_failure(error: &MediClearError) -> i32 {
    eprintln!("❌ {error}");
    if let MediClearError::ReportDetails { .. } = error {
        eprintln!("   {}", error.cause_message());
    }
    exit_code_for(error)
}

/// Connects or prints why it could not
pub(crate) fn connect_or_report(
    options: &GlobalOptions,
) -> std::result::Result<Arc<dyn HealthGateway>, i32> {
    options.connect().map_err(|e| {
        tracing::error!(error = %e, "Failed to prepare API client");
        report_failure(&e)
    })
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{title}:");
    for item in items {
        println!("  • {item}");
    }
}
