//! Configuration management for MediClear.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! MediClear reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MEDICLEAR_*` environment overrides
//! - Default values for every setting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mediclear::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("mediclear.toml")?;
//! println!("API: {}", config.api.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "http://localhost:8000/api/v1"
//! timeout_seconds = 60
//! api_token = "${MEDICLEAR_TOKEN}"
//!
//! [upload]
//! max_file_size_mb = 10
//! allowed_content_types = ["application/pdf", "image/jpeg", "image/png"]
//!
//! [logging]
//! local_enabled = false
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApiConfig, ApplicationConfig, LoggingConfig, MediClearConfig, UploadConfig,
    DEFAULT_API_BASE_URL,
};
pub use secret::{secret_string, SecretString, SecretValue};
