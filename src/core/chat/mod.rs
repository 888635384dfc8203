//! Question answering over the user's records
//!
//! - [`session`] - the append-only conversation log
//! - [`manager`] - serialized asks with first-response session binding

pub mod manager;
pub mod session;

pub use manager::{AskOutcome, AskRejection, ChatSessionManager};
pub use session::{ChatSession, APOLOGY};
