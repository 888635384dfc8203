//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! configuration that talks to a locally running API.

use crate::config::SecretString;
use crate::domain::records::MAX_UPLOAD_SIZE_MB;
use crate::domain::UploadPolicy;
use serde::{Deserialize, Serialize};

/// Base URL used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Main MediClear configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediClearConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Upload pre-flight constraints
    #[serde(default)]
    pub upload: UploadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MediClearConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.upload.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Optional bearer token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            api_token: None,
        }
    }
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.trim().is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("api.base_url '{}' is not a valid URL: {e}", self.base_url))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        if self.connect_timeout_seconds == 0 {
            return Err("api.connect_timeout_seconds must be > 0".to_string());
        }

        if let Some(token) = &self.api_token {
            if token.expose_secret().is_empty() {
                return Err("api.api_token cannot be empty when set".to_string());
            }
        }

        Ok(())
    }
}

/// Upload pre-flight configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted file in MiB
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Accepted MIME types
    #[serde(default = "default_allowed_content_types")]
    pub allowed_content_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            allowed_content_types: default_allowed_content_types(),
        }
    }
}

impl UploadConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_file_size_mb == 0 {
            return Err("upload.max_file_size_mb must be > 0".to_string());
        }
        if self.max_file_size_mb > MAX_UPLOAD_SIZE_MB {
            return Err(format!(
                "upload.max_file_size_mb must be at most {MAX_UPLOAD_SIZE_MB}"
            ));
        }
        if self.allowed_content_types.is_empty() {
            return Err("upload.allowed_content_types cannot be empty".to_string());
        }
        Ok(())
    }

    /// The policy the gateway enforces before uploading
    pub fn policy(&self) -> UploadPolicy {
        UploadPolicy::new(self.max_file_size_mb, self.allowed_content_types.clone())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when file logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_allowed_content_types() -> Vec<String> {
    UploadPolicy::default().allowed_content_types
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
