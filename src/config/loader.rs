//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MediClearConfig;
use super::secret::secret_string;
use crate::domain::errors::MediClearError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MediClearConfig
/// 4. Applies environment variable overrides (MEDICLEAR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use mediclear::config::loader::load_config;
///
/// let config = load_config("mediclear.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MediClearConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediClearError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MediClearError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MediClearConfig = toml::from_str(&contents)
        .map_err(|e| MediClearError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration from `path` when the file exists, otherwise starts
/// from built-in defaults
///
/// Environment overrides and validation apply in both cases, so a bare
/// `MEDICLEAR_API_BASE_URL` is enough to point the client at a server.
///
/// # Errors
///
/// Same as [`load_config`], except a missing file is not an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<MediClearConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = MediClearConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut MediClearConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        MediClearError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MediClearError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(MediClearError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the MEDICLEAR_* prefix
///
/// Environment variables follow the pattern: MEDICLEAR_<SECTION>_<KEY>,
/// for example MEDICLEAR_API_BASE_URL.
fn apply_env_overrides(config: &mut MediClearConfig) -> Result<()> {
    if let Ok(val) = std::env::var("MEDICLEAR_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("MEDICLEAR_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("MEDICLEAR_API_TOKEN") {
        config.api.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("MEDICLEAR_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_override("MEDICLEAR_API_TIMEOUT_SECONDS", &val)?;
    }

    if let Ok(val) = std::env::var("MEDICLEAR_UPLOAD_MAX_FILE_SIZE_MB") {
        config.upload.max_file_size_mb =
            parse_override("MEDICLEAR_UPLOAD_MAX_FILE_SIZE_MB", &val)?;
    }

    if let Ok(val) = std::env::var("MEDICLEAR_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDICLEAR_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_override(name: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        MediClearError::Configuration(format!("{name} must be a positive integer, got '{value}'"))
    })
}
