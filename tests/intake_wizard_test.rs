//! Integration tests for the symptom intake wizard

mod common;

use common::{assessment, StubGateway};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use mediclear::core::intake::{IntakeForm, IntakeWizard, WizardState};
use mediclear::domain::{Gender, MediClearError, UrgencyLevel};
use std::sync::atomic::Ordering;
use std::time::Duration;
use test_case::test_case;

fn filled_to_severity(symptoms: &str, age: &str) -> IntakeWizard {
    let mut wizard = IntakeWizard::new();
    wizard.set_symptoms(symptoms).unwrap();
    assert!(wizard.next());
    wizard.set_age(age).unwrap();
    wizard.set_gender(Gender::Female).unwrap();
    wizard.set_duration("3 days").unwrap();
    assert!(wizard.next());
    wizard
}

#[test_case("", false ; "empty")]
#[test_case("   \t", false ; "whitespace only")]
#[test_case("headache", true ; "plain text")]
#[test_case("  sore throat  ", true ; "padded text")]
fn test_symptoms_gate(symptoms: &str, opens: bool) {
    let mut wizard = IntakeWizard::new();
    wizard.set_symptoms(symptoms).unwrap();
    assert_eq!(wizard.can_advance(), opens);
    assert_eq!(wizard.next(), opens);
    let expected = if opens {
        WizardState::Demographics
    } else {
        WizardState::Symptoms
    };
    assert_eq!(wizard.state(), &expected);
}

#[test_case("", Some(Gender::Male), "2 days", false ; "missing age")]
#[test_case("34", None, "2 days", false ; "missing gender")]
#[test_case("34", Some(Gender::Other), " ", false ; "blank duration")]
#[test_case("34", Some(Gender::Male), "2 days", true ; "complete")]
#[test_case("thirty", Some(Gender::Female), "1 week", true ; "non numeric age still opens")]
fn test_demographics_gate(age: &str, gender: Option<Gender>, duration: &str, opens: bool) {
    let mut wizard = IntakeWizard::new();
    wizard.set_symptoms("fever").unwrap();
    wizard.next();

    wizard.set_age(age).unwrap();
    if let Some(gender) = gender {
        wizard.set_gender(gender).unwrap();
    }
    wizard.set_duration(duration).unwrap();

    assert_eq!(wizard.next(), opens);
}

#[test_case("34", Some(34) ; "number")]
#[test_case(" 34 years", Some(34) ; "leading number")]
#[test_case("-5", Some(-5) ; "negative")]
#[test_case("thirty", None ; "words")]
fn test_age_is_parsed_at_submission(age: &str, expected: Option<i64>) {
    let wizard = filled_to_severity("fever", age);
    assert_eq!(wizard.build_intake().unwrap().age, expected);
}

#[tokio::test]
async fn test_fever_scenario_reaches_result() {
    let gateway = StubGateway::default();
    gateway.push_assessment(Ok(assessment(UrgencyLevel::Moderate, 45)));

    let mut wizard = IntakeWizard::new();
    wizard.set_symptoms("fever").unwrap();
    assert!(wizard.next());
    wizard.set_age("34").unwrap();
    wizard.set_gender(Gender::Male).unwrap();
    wizard.set_duration("2 days").unwrap();
    assert!(wizard.next());
    wizard.set_severity(5).unwrap();

    let result = wizard.submit(&gateway).await.unwrap();
    assert_eq!(result.urgency_level, UrgencyLevel::Moderate);
    assert!(matches!(wizard.state(), WizardState::Result(_)));

    let sent = gateway.intakes.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].symptoms, "fever");
    assert_eq!(sent[0].age, Some(34));
    assert_eq!(sent[0].gender, Gender::Male);
    assert_eq!(sent[0].duration, "2 days");
    assert_eq!(sent[0].severity, 5);

    // Result is terminal until reset
    assert!(!wizard.next());
    assert!(!wizard.back());
    assert!(wizard.set_symptoms("again").unwrap_err().is_validation());
    assert!(matches!(wizard.state(), WizardState::Result(_)));
}

#[tokio::test]
async fn test_failed_submit_keeps_fields_and_error() {
    let gateway = StubGateway::default();
    gateway.push_assessment(Err(MediClearError::Server(
        "Symptom analysis is temporarily unavailable".into(),
    )));

    let symptoms: String = Sentence(3..8).fake();
    let mut wizard = filled_to_severity(&symptoms, "52");
    wizard.set_severity(8).unwrap();
    let before = wizard.form().clone();

    let err = wizard.submit(&gateway).await.unwrap_err();
    assert_eq!(err.to_string(), "Symptom analysis is temporarily unavailable");
    assert_eq!(wizard.state(), &WizardState::Severity);
    assert_eq!(wizard.form(), &before);
    assert_eq!(wizard.error(), Some(&err));

    // Retrying clears the error
    gateway.push_assessment(Ok(assessment(UrgencyLevel::Normal, 10)));
    wizard.submit(&gateway).await.unwrap();
    assert!(wizard.error().is_none());
}

#[tokio::test]
async fn test_cancelled_submit_returns_to_severity() {
    let gateway = StubGateway::default();
    gateway.stall_analysis.store(true, Ordering::SeqCst);

    let mut wizard = filled_to_severity("persistent headache", "45");
    wizard.set_severity(6).unwrap();
    let before = wizard.form().clone();

    let timed_out =
        tokio::time::timeout(Duration::from_millis(10), wizard.submit(&gateway)).await;
    assert!(timed_out.is_err());

    assert_eq!(wizard.state(), &WizardState::Severity);
    assert_eq!(wizard.form(), &before);
    assert!(wizard.error().is_none());
    assert!(wizard.set_symptoms("persistent headache, nausea").is_ok());
    assert!(wizard.back());

    // The retry goes through once the gateway answers again
    gateway.stall_analysis.store(false, Ordering::SeqCst);
    gateway.push_assessment(Ok(assessment(UrgencyLevel::Moderate, 40)));
    assert!(wizard.next());
    wizard.submit(&gateway).await.unwrap();
    assert_eq!(gateway.intakes.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_submit_outside_severity_makes_no_call() {
    let gateway = StubGateway::default();
    let mut wizard = IntakeWizard::new();
    wizard.set_symptoms("fever").unwrap();

    let err = wizard.submit(&gateway).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(wizard.state(), &WizardState::Symptoms);
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_reset_after_result_restores_initial_values() {
    let gateway = StubGateway::default();
    gateway.push_assessment(Ok(assessment(UrgencyLevel::Urgent, 95)));

    let mut wizard = filled_to_severity("chest pain", "61");
    wizard.set_severity(9).unwrap();
    wizard.submit(&gateway).await.unwrap();

    wizard.reset();
    assert_eq!(wizard.state(), &WizardState::Symptoms);
    assert_eq!(wizard.form(), &IntakeForm::default());
    assert_eq!(wizard.form().severity, 5);
    assert!(wizard.assessment().is_none());
    assert!(wizard.error().is_none());
}

#[test]
fn test_back_and_forth_preserves_generated_values() {
    for _ in 0..10 {
        let symptoms: String = Sentence(2..6).fake();
        let age = (1..120).fake::<u32>().to_string();
        let severity = (1..=10).fake::<u8>();

        let mut wizard = filled_to_severity(&symptoms, &age);
        wizard.set_severity(severity).unwrap();
        let before = wizard.form().clone();

        assert!(wizard.back());
        assert!(wizard.back());
        assert!(wizard.next());
        assert!(wizard.next());
        assert_eq!(wizard.form(), &before);
    }
}
