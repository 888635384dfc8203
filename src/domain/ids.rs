//! Domain identifier types with validation
//!
//! Newtype wrappers for the opaque identifiers handed out by the MediClear API.
//! Both are server-issued; the client only checks that they are non-empty.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Medical record identifier
///
/// # Examples
///
/// ```
/// use mediclear::domain::ids::RecordId;
/// use std::str::FromStr;
///
/// let record_id = RecordId::from_str("0b6c1d0e-3f63-4f7c-9d2e-7c1f7d9e2a11").unwrap();
/// assert_eq!(record_id.as_str(), "0b6c1d0e-3f63-4f7c-9d2e-7c1f7d9e2a11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId from a string
    ///
    /// Returns `Err` if the identifier is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Record ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the record ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Chat session identifier
///
/// Opaque token correlating a sequence of question/answer turns server-side.
/// The server is authoritative: the client never mints one, it only binds the
/// value returned by the first successful ask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new SessionId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Session ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the session ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
