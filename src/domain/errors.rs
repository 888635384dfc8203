//! Domain error types
//!
//! This module defines the error contract shared by every MediClear component.
//! Raw HTTP failures are captured as [`TransportError`] inside the adapter layer
//! and are always normalized into a [`MediClearError`] before they reach a caller.

use thiserror::Error;

/// Main MediClear error type
///
/// Every fallible operation in the library returns this type. The first three
/// variants carry a message that is already fit for display: they are rendered
/// verbatim, without any prefix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediClearError {
    /// Local pre-flight failure (missing fields, file constraints).
    /// Never touches the network; recoverable by editing the input.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a structured `detail` payload
    #[error("{0}")]
    Server(String),

    /// No usable server payload; the message is operation-prefixed
    #[error("{0}")]
    Transport(String),

    /// The mandatory record of an aggregated report could not be loaded
    #[error("Failed to load report details")]
    ReportDetails {
        /// The normalized failure of the record fetch
        #[source]
        source: Box<MediClearError>,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl MediClearError {
    /// Returns the display message without the aggregate wrapper
    ///
    /// For [`MediClearError::ReportDetails`] this is the message of the
    /// underlying cause, which is what a detail screen usually wants to show
    /// next to the fixed headline.
    pub fn cause_message(&self) -> String {
        match self {
            MediClearError::ReportDetails { source } => source.to_string(),
            other => other.to_string(),
        }
    }

    /// Whether this error was produced locally, before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, MediClearError::Validation(_))
    }
}

/// Raw failure of a single HTTP round-trip
///
/// Produced by the transport client only. The gateway turns it into a
/// [`MediClearError`] through the single normalization function in
/// `adapters::health_api::transport`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The server answered with a non-success status code
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Parsed JSON body, when the body was JSON
        payload: Option<serde_json::Value>,
    },

    /// The request never produced a response (connection, timeout, TLS)
    #[error("{0}")]
    Network(String),

    /// The body could not be decoded into the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Structured server payload, if the failure carried one
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            TransportError::Status { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// HTTP status code, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Lower-level message, or `None` when there is nothing useful to show
    pub fn message(&self) -> Option<String> {
        let message = self.to_string();
        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for MediClearError {
    fn from(err: std::io::Error) -> Self {
        MediClearError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MediClearError {
    fn from(err: serde_json::Error) -> Self {
        MediClearError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MediClearError {
    fn from(err: toml::de::Error) -> Self {
        MediClearError::Configuration(format!("TOML parse error: {err}"))
    }
}
