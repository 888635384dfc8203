//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the MediClear configuration file.

use super::GlobalOptions;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, options: &GlobalOptions) -> anyhow::Result<i32> {
        let config_path = options.config_path.as_str();
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        if !Path::new(config_path).exists() {
            println!("❌ Configuration file not found: {config_path}");
            println!("   Run `mediclear init` to create one");
            return Ok(2);
        }

        // --api-url is part of the effective configuration
        let config = match options.load_config() {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API Base URL: {}", config.api.base_url);
        println!(
            "  Timeouts: {}s request, {}s connect",
            config.api.timeout_seconds, config.api.connect_timeout_seconds
        );
        println!(
            "  API Token: {}",
            if config.api.api_token.is_some() {
                "configured"
            } else {
                "not set"
            }
        );
        println!("  Max Upload Size: {} MB", config.upload.max_file_size_mb);
        println!(
            "  Allowed Upload Types: {}",
            config.upload.allowed_content_types.join(", ")
        );
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        Ok(0)
    }
}
