//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "mediclear.toml")]
    pub output: String,

    /// Include every setting with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing MediClear configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your API address", self.output);
                println!("  2. Put MEDICLEAR_API_TOKEN in a .env file if the API needs one");
                println!("  3. Validate configuration: mediclear validate-config");
                println!("  4. Try it: mediclear dashboard");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# MediClear Configuration File

[application]
log_level = "info"

[api]
base_url = "http://localhost:8000/api/v1"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# MediClear Configuration File
# Every value below is the default. ${VAR} placeholders are replaced with
# environment variables, and MEDICLEAR_* variables override the file.

[application]
# trace | debug | info | warn | error
log_level = "info"

[api]
# MediClear API root (override: MEDICLEAR_API_BASE_URL)
base_url = "http://localhost:8000/api/v1"
# Whole-request timeout; symptom analysis and explanations can be slow
timeout_seconds = 60
connect_timeout_seconds = 10
# Bearer token (override: MEDICLEAR_API_TOKEN)
# api_token = "${MEDICLEAR_TOKEN}"

[upload]
# Files larger than this are rejected before upload
max_file_size_mb = 10
allowed_content_types = ["application/pdf", "image/jpeg", "image/png"]

[logging]
# JSON log files in addition to the console
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
