//! Conversational session manager
//!
//! Owns one [`ChatSession`] and serializes questions against the gateway.
//! The user's message is appended before the request goes out; the reply (or
//! an apology) is appended when it settles. At most one ask is in flight.

use super::session::{ChatSession, APOLOGY};
use crate::adapters::health_api::HealthGateway;
use crate::domain::{ChatAnswer, ChatMessage, MediClearError, Result, SessionId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Why a question was not sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskRejection {
    /// Empty or whitespace-only question
    EmptyQuestion,
    /// Another question is still awaiting its answer
    AskInFlight,
}

/// Result of one [`ChatSessionManager::ask`]
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    /// The assistant answered; its message is in the log
    Answered(ChatAnswer),
    /// The request failed; an apology is in the log. The error is kept for
    /// diagnostics only.
    Failed(MediClearError),
    /// Nothing was sent and the log is unchanged
    Rejected(AskRejection),
}

/// Clears the in-flight flag when dropped, including on cancellation
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Manager for one conversation
///
/// # Example
///
/// ```no_run
/// use mediclear::adapters::health_api::{HealthGateway, HttpGateway};
/// use mediclear::config::MediClearConfig;
/// use mediclear::core::chat::{AskOutcome, ChatSessionManager};
/// use std::sync::Arc;
///
/// # async fn example() -> mediclear::domain::Result<()> {
/// let gateway: Arc<dyn HealthGateway> =
///     Arc::new(HttpGateway::from_config(&MediClearConfig::default())?);
/// let manager = ChatSessionManager::new(gateway);
///
/// if let AskOutcome::Answered(answer) = manager.ask("Is my glucose normal?").await {
///     println!("{}", answer.answer);
/// }
/// for message in manager.messages() {
///     println!("{:?}: {}", message.role, message.content);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ChatSessionManager {
    gateway: Arc<dyn HealthGateway>,
    session: Mutex<ChatSession>,
    in_flight: AtomicBool,
}

impl ChatSessionManager {
    /// A manager with an empty, unbound session
    pub fn new(gateway: Arc<dyn HealthGateway>) -> Self {
        Self::with_session(gateway, ChatSession::new())
    }

    pub fn with_session(gateway: Arc<dyn HealthGateway>, session: ChatSession) -> Self {
        Self {
            gateway,
            session: Mutex::new(session),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Continues a stored conversation
    ///
    /// # Errors
    ///
    /// Returns the normalized history fetch error.
    pub async fn resume(gateway: Arc<dyn HealthGateway>, session_id: &SessionId) -> Result<Self> {
        let history = gateway.get_chat_history(session_id).await?;
        if &history.session_id != session_id {
            tracing::warn!(
                requested = %session_id,
                returned = %history.session_id,
                "History returned for a different session id, keeping the requested one"
            );
        }
        crate::log_session_event!(session_id, "Session resumed");
        let session = ChatSession::from_history(session_id.clone(), history);
        Ok(Self::with_session(gateway, session))
    }

    fn session(&self) -> MutexGuard<'_, ChatSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Asks one question
    ///
    /// Never returns an error: failures end up as an apology in the log.
    pub async fn ask(&self, question: &str) -> AskOutcome {
        if question.trim().is_empty() {
            return AskOutcome::Rejected(AskRejection::EmptyQuestion);
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Question rejected, another ask is in flight");
            return AskOutcome::Rejected(AskRejection::AskInFlight);
        };

        let session_id = {
            let mut session = self.session();
            session.push(ChatMessage::user(question));
            session.session_id().cloned()
        };

        let result = self.gateway.ask_question(question, session_id.as_ref()).await;

        let mut session = self.session();
        match result {
            Ok(answer) => {
                if session.bind_session_id(answer.session_id.clone()) {
                    crate::log_session_event!(&answer.session_id, "Session bound");
                } else if session.session_id() != Some(&answer.session_id) {
                    tracing::warn!(
                        bound = ?session.session_id(),
                        returned = %answer.session_id,
                        "Server returned a different session id, keeping the bound one"
                    );
                }
                session.push(ChatMessage::assistant(answer.answer.clone()));
                session.set_follow_up_suggestions(answer.follow_up_suggestions.clone());
                AskOutcome::Answered(answer)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "chat ask failed");
                session.push(ChatMessage::assistant(APOLOGY));
                AskOutcome::Failed(e)
            }
        }
    }

    /// Snapshot of the conversation log
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.session().messages().to_vec()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session().session_id().cloned()
    }

    pub fn follow_up_suggestions(&self) -> Vec<String> {
        self.session().follow_up_suggestions().to_vec()
    }

    /// Whether a question is awaiting its answer
    pub fn is_asking(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn into_session(self) -> ChatSession {
        self.session
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
