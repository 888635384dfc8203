//! Conversation domain models

use super::ids::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person asking
    User,
    /// The assistant (including synthetic apologies)
    Assistant,
}

/// One entry of the conversation log
///
/// Never mutated once appended to a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    /// When the message was produced locally (or stored server-side)
    pub timestamp: DateTime<Utc>,
    /// Author
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A user message stamped with the current instant
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// An assistant message stamped with the current instant
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Answer to one question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatAnswer {
    /// Session the server filed this turn under
    pub session_id: SessionId,
    /// Assistant reply
    pub answer: String,
    /// Records the reply draws on
    pub referenced_records: Vec<String>,
    /// Server's confidence in the reply (0.0..=1.0), when provided
    pub confidence_score: Option<f64>,
    /// Suggested follow-up questions
    pub follow_up_suggestions: Vec<String>,
}

/// Stored conversation for a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatHistory {
    /// Session identifier
    pub session_id: SessionId,
    /// Messages, oldest first
    pub messages: Vec<ChatMessage>,
}
