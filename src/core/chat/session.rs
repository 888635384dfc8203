//! Conversation state

use crate::domain::{ChatHistory, ChatMessage, SessionId};

/// Assistant message appended when a question could not be answered
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// An ordered conversation log with its lazily bound session id
///
/// Messages are only ever appended. The session id starts absent and, once
/// bound, never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    session_id: Option<SessionId>,
    messages: Vec<ChatMessage>,
    follow_up_suggestions: Vec<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session pre-bound to `session_id`, seeded with its stored messages
    ///
    /// The id echoed inside `history` is ignored; the requested one wins.
    pub fn from_history(session_id: SessionId, history: ChatHistory) -> Self {
        Self {
            session_id: Some(session_id),
            messages: history.messages,
            follow_up_suggestions: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Suggestions attached to the most recent answer
    pub fn follow_up_suggestions(&self) -> &[String] {
        &self.follow_up_suggestions
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Binds the session id if none is bound yet; returns whether it bound
    pub(crate) fn bind_session_id(&mut self, session_id: SessionId) -> bool {
        if self.session_id.is_some() {
            return false;
        }
        self.session_id = Some(session_id);
        true
    }

    pub(crate) fn set_follow_up_suggestions(&mut self, suggestions: Vec<String>) {
        self.follow_up_suggestions = suggestions;
    }
}
