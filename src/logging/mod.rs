//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - Configurable log levels
//! - Optional JSON file logging with rotation
//! - Helper macros for the events every component emits
//!
//! # Example
//!
//! ```no_run
//! use mediclear::logging::init_logging;
//! use mediclear::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Client started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a failed HTTP round-trip
///
/// # Example
///
/// ```no_run
/// use mediclear::log_request_failure;
///
/// let payload: Option<serde_json::Value> = None;
/// log_request_failure!("GET", "/records", Some(503u16), payload);
/// ```
#[macro_export]
macro_rules! log_request_failure {
    ($method:expr, $path:expr, $status:expr, $payload:expr) => {
        tracing::error!(
            method = %$method,
            path = %$path,
            status = ?$status,
            payload = ?$payload,
            "API request failed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use mediclear::log_error_with_context;
/// use mediclear::domain::MediClearError;
///
/// let error = MediClearError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a chat session lifecycle event
///
/// # Example
///
/// ```no_run
/// use mediclear::log_session_event;
/// use mediclear::domain::SessionId;
///
/// let session_id = SessionId::new("s-1").unwrap();
/// log_session_event!(&session_id, "Session bound");
/// ```
#[macro_export]
macro_rules! log_session_event {
    ($session_id:expr, $event:expr) => {
        tracing::info!(
            session_id = %$session_id,
            event = $event,
            "Chat session event"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{MediClearError, SessionId};

    #[test]
    fn test_macros_expand_without_subscriber() {
        let error = MediClearError::Transport("Failed to fetch records: timeout".into());
        log_error_with_context!(&error, "records");

        let payload = Some(serde_json::json!({"detail": "nope"}));
        log_request_failure!("GET", "/records", Some(500u16), payload);

        let session_id = SessionId::new("s-1").unwrap();
        log_session_event!(&session_id, "Session bound");
    }
}
