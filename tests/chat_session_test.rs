//! Integration tests for the conversational session manager

mod common;

use common::{answer, history, StubGateway};
use mediclear::core::chat::{AskOutcome, AskRejection, ChatSessionManager, APOLOGY};
use mediclear::domain::{ChatMessage, ChatRole, MediClearError, SessionId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

fn manager_with(gateway: &Arc<StubGateway>) -> ChatSessionManager {
    ChatSessionManager::new(gateway.clone())
}

#[tokio::test]
async fn test_session_id_is_bound_once() {
    let gateway = Arc::new(StubGateway::default());
    gateway.push_answer(Ok(answer("s-1", "Your results are within range.")));
    gateway.push_answer(Ok(answer("s-other", "Keep it up.")));
    let manager = manager_with(&gateway);

    manager.ask("How are my results?").await;
    manager.ask("Anything to improve?").await;

    assert_eq!(manager.session_id(), Some(SessionId::new("s-1").unwrap()));
    let questions = gateway.questions.lock().unwrap().clone();
    assert_eq!(questions[0].1, None);
    assert_eq!(questions[1].1, Some(SessionId::new("s-1").unwrap()));
}

#[tokio::test]
async fn test_failures_grow_log_by_two() {
    let gateway = Arc::new(StubGateway::default());
    gateway.push_answer(Err(MediClearError::Transport(
        "Failed to get answer: Network Error".into(),
    )));
    let manager = manager_with(&gateway);

    for round in 1..=3 {
        let outcome = manager.ask("Hello?").await;
        assert!(matches!(outcome, AskOutcome::Failed(_)));
        let messages = manager.messages();
        assert_eq!(messages.len(), round * 2);
        let last = messages.last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, APOLOGY);
    }
    assert!(manager.session_id().is_none());
}

#[tokio::test]
async fn test_log_order_is_user_then_assistant() {
    let gateway = Arc::new(StubGateway::default());
    gateway.push_answer(Ok(answer("s-9", "A")));
    gateway.push_answer(Err(MediClearError::Server("Session expired".into())));
    gateway.push_answer(Ok(answer("s-9", "C")));
    let manager = manager_with(&gateway);

    manager.ask("1").await;
    manager.ask("2").await;
    manager.ask("3").await;

    let transcript: Vec<(ChatRole, String)> = manager
        .messages()
        .into_iter()
        .map(|m| (m.role, m.content))
        .collect();
    assert_eq!(
        transcript,
        vec![
            (ChatRole::User, "1".to_string()),
            (ChatRole::Assistant, "A".to_string()),
            (ChatRole::User, "2".to_string()),
            (ChatRole::Assistant, APOLOGY.to_string()),
            (ChatRole::User, "3".to_string()),
            (ChatRole::Assistant, "C".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_empty_question_sends_nothing() {
    let gateway = Arc::new(StubGateway::default());
    let manager = manager_with(&gateway);

    assert_eq!(
        manager.ask("").await,
        AskOutcome::Rejected(AskRejection::EmptyQuestion)
    );
    assert!(manager.messages().is_empty());
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_resume_failure_surfaces_error() {
    let gateway = Arc::new(StubGateway::default());
    let result = ChatSessionManager::resume(gateway, &SessionId::new("s-1").unwrap()).await;
    match result {
        Err(e) => assert_eq!(e.to_string(), "Failed to fetch chat history: Network Error"),
        Ok(_) => panic!("resume should fail"),
    }
}

#[tokio::test]
async fn test_follow_ups_come_from_last_answer() {
    let gateway = Arc::new(StubGateway::default());
    gateway.push_answer(Ok(answer("s-1", "Your glucose is fine.")));
    gateway.push_answer(Err(MediClearError::Transport(
        "Failed to get answer: timeout".into(),
    )));
    let manager = manager_with(&gateway);

    manager.ask("Is my glucose ok?").await;
    assert_eq!(manager.follow_up_suggestions(), vec!["What should I eat?"]);

    manager.ask("And my iron?").await;
    assert!(!manager.is_asking());
    assert_eq!(manager.messages().len(), 4);
}

#[tokio::test]
async fn test_concurrent_ask_is_rejected() {
    let gate = Arc::new(Semaphore::new(0));
    let gateway = Arc::new(StubGateway::default().with_ask_gate(gate.clone()));
    gateway.push_answer(Ok(answer("s-1", "First answer")));
    let manager = manager_with(&gateway);

    let (first, second) = tokio::join!(manager.ask("first"), async {
        tokio::task::yield_now().await;
        assert!(manager.is_asking());
        assert_eq!(manager.messages().len(), 1);
        let outcome = manager.ask("second").await;
        gate.add_permits(1);
        outcome
    });

    assert!(matches!(first, AskOutcome::Answered(_)));
    assert_eq!(second, AskOutcome::Rejected(AskRejection::AskInFlight));
    let contents: Vec<String> = manager.messages().into_iter().map(|m| m.content).collect();
    assert_eq!(contents, ["first", "First answer"]);
    assert_eq!(gateway.questions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancelled_ask_frees_the_session() {
    let gate = Arc::new(Semaphore::new(0));
    let gateway = Arc::new(StubGateway::default().with_ask_gate(gate.clone()));
    gateway.push_answer(Ok(answer("s-1", "late")));
    gateway.push_answer(Ok(answer("s-1", "on time")));
    let manager = manager_with(&gateway);

    let timed_out = tokio::time::timeout(Duration::from_millis(10), manager.ask("dropped")).await;
    assert!(timed_out.is_err());
    assert!(!manager.is_asking());

    gate.add_permits(1);
    assert!(matches!(manager.ask("again").await, AskOutcome::Answered(_)));
}

#[tokio::test]
async fn test_resume_seeds_history_under_requested_id() {
    let gateway = Arc::new(StubGateway::default());
    gateway.push_history(Ok(history(
        "s-echoed",
        vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")],
    )));
    gateway.push_answer(Ok(answer("s-7", "again")));

    let requested = SessionId::new("s-7").unwrap();
    let manager = ChatSessionManager::resume(gateway.clone(), &requested)
        .await
        .unwrap();
    assert_eq!(manager.session_id(), Some(requested.clone()));
    assert_eq!(manager.messages().len(), 2);

    manager.ask("more").await;
    let questions = gateway.questions.lock().unwrap().clone();
    assert_eq!(questions[0].1, Some(requested.clone()));

    let session = manager.into_session();
    assert_eq!(session.len(), 4);
    assert_eq!(session.session_id(), Some(&requested));
}
