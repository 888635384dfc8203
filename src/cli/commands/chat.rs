//! Chat command implementation
//!
//! Asks the questions given on the command line in order, or reads them from
//! stdin one per line when none are given. `--session` continues a stored
//! conversation.

use super::{connect_or_report, report_failure, GlobalOptions};
use crate::core::chat::{AskOutcome, AskRejection, ChatSessionManager, APOLOGY};
use crate::domain::{ChatRole, SessionId};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Arguments for the chat command
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Questions to ask; read from stdin when omitted
    pub questions: Vec<String>,

    /// Continue an existing conversation
    #[arg(short, long)]
    pub session: Option<SessionId>,

    /// Print the stored conversation and exit
    #[arg(long, requires = "session")]
    pub history: bool,
}

impl ChatArgs {
    /// Execute the chat command
    pub async fn execute(&self, options: &GlobalOptions) -> anyhow::Result<i32> {
        let gateway = match connect_or_report(options) {
            Ok(gateway) => gateway,
            Err(code) => return Ok(code),
        };

        let manager = match &self.session {
            Some(session_id) => match ChatSessionManager::resume(gateway, session_id).await {
                Ok(manager) => manager,
                Err(e) => return Ok(report_failure(&e)),
            },
            None => ChatSessionManager::new(gateway),
        };

        if self.history {
            print_transcript(&manager);
            return Ok(0);
        }

        let mut failures = 0usize;
        if self.questions.is_empty() {
            println!("💬 Ask about your health records. Empty line or Ctrl+D to quit.");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    break;
                }
                if !ask(&manager, &line).await {
                    failures += 1;
                }
            }
        } else {
            for question in &self.questions {
                println!("> {question}");
                if !ask(&manager, question).await {
                    failures += 1;
                }
            }
        }

        if let Some(session_id) = manager.session_id() {
            println!();
            println!("Session: {session_id}");
        }
        Ok(if failures == 0 { 0 } else { 1 })
    }
}

/// Asks one question and prints the reply; returns whether it was answered
async fn ask(manager: &ChatSessionManager, question: &str) -> bool {
    match manager.ask(question).await {
        AskOutcome::Answered(answer) => {
            println!("{}", answer.answer);
            if !answer.referenced_records.is_empty() {
                println!("   (based on: {})", answer.referenced_records.join(", "));
            }
            for suggestion in &answer.follow_up_suggestions {
                println!("   ↳ {suggestion}");
            }
            println!();
            true
        }
        AskOutcome::Failed(e) => {
            tracing::debug!(error = %e, "Question failed");
            println!("{APOLOGY}");
            println!();
            false
        }
        AskOutcome::Rejected(AskRejection::EmptyQuestion) => true,
        AskOutcome::Rejected(AskRejection::AskInFlight) => {
            println!("Still waiting for the previous answer.");
            false
        }
    }
}

fn print_transcript(manager: &ChatSessionManager) {
    let messages = manager.messages();
    if messages.is_empty() {
        println!("No messages in this conversation.");
        return;
    }
    for message in messages {
        let speaker = match message.role {
            ChatRole::User => "You",
            ChatRole::Assistant => "Assistant",
        };
        println!(
            "[{}] {speaker}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            message.content
        );
    }
}
