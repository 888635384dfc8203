//! Three-step symptom intake wizard
//!
//! The wizard walks `Symptoms -> Demographics -> Severity`, gating each forward
//! step on the fields it needs, then submits through a [`HealthGateway`].
//! Moving back never clears what was entered.

use crate::adapters::health_api::HealthGateway;
use crate::domain::symptoms::{parse_age, DEFAULT_SEVERITY, MAX_SEVERITY, MIN_SEVERITY};
use crate::domain::{Gender, MediClearError, Result, SymptomAssessment, SymptomIntake};
use std::fmt;

/// Where the wizard currently is
#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    /// Step 1: describe the symptoms
    Symptoms,
    /// Step 2: age, gender and duration
    Demographics,
    /// Step 3: severity, then submit
    Severity,
    /// Waiting for the analysis
    Submitting,
    /// Analysis received
    Result(Box<SymptomAssessment>),
}

impl WizardState {
    /// One-based step number of the three form steps
    pub fn step_number(&self) -> Option<u8> {
        match self {
            WizardState::Symptoms => Some(1),
            WizardState::Demographics => Some(2),
            WizardState::Severity => Some(3),
            WizardState::Submitting | WizardState::Result(_) => None,
        }
    }

    fn is_form_step(&self) -> bool {
        self.step_number().is_some()
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WizardState::Symptoms => "symptoms",
            WizardState::Demographics => "demographics",
            WizardState::Severity => "severity",
            WizardState::Submitting => "submitting",
            WizardState::Result(_) => "result",
        };
        f.write_str(label)
    }
}

/// Raw form fields as entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    pub symptoms: String,
    /// Age exactly as typed; parsed only on submission
    pub age: String,
    pub gender: Option<Gender>,
    pub duration: String,
    pub severity: u8,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self {
            symptoms: String::new(),
            age: String::new(),
            gender: None,
            duration: String::new(),
            severity: DEFAULT_SEVERITY,
        }
    }
}

/// Symptom intake state machine
///
/// # Example
///
/// ```no_run
/// use mediclear::core::intake::IntakeWizard;
/// use mediclear::adapters::health_api::HttpGateway;
/// use mediclear::config::MediClearConfig;
/// use mediclear::domain::Gender;
///
/// # async fn example() -> mediclear::domain::Result<()> {
/// let gateway = HttpGateway::from_config(&MediClearConfig::default())?;
/// let mut wizard = IntakeWizard::new();
/// wizard.set_symptoms("fever and chills")?;
/// wizard.next();
/// wizard.set_age("34")?;
/// wizard.set_gender(Gender::Male)?;
/// wizard.set_duration("2 days")?;
/// wizard.next();
/// let assessment = wizard.submit(&gateway).await?;
/// println!("Urgency: {}", assessment.urgency_level);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeWizard {
    state: WizardState,
    form: IntakeForm,
    error: Option<MediClearError>,
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self {
            state: WizardState::Symptoms,
            form: IntakeForm::default(),
            error: None,
        }
    }
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    /// Last submission failure, until dismissed or replaced
    pub fn error(&self) -> Option<&MediClearError> {
        self.error.as_ref()
    }

    /// The assessment, once the wizard reached its result
    pub fn assessment(&self) -> Option<&SymptomAssessment> {
        match &self.state {
            WizardState::Result(assessment) => Some(assessment),
            _ => None,
        }
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.state.is_form_step() {
            Ok(())
        } else {
            Err(MediClearError::Validation(format!(
                "The intake cannot be edited while in the {} state",
                self.state
            )))
        }
    }

    pub fn set_symptoms(&mut self, symptoms: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.form.symptoms = symptoms.into();
        Ok(())
    }

    pub fn set_age(&mut self, age: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.form.age = age.into();
        Ok(())
    }

    pub fn set_gender(&mut self, gender: Gender) -> Result<()> {
        self.ensure_editable()?;
        self.form.gender = Some(gender);
        Ok(())
    }

    pub fn set_duration(&mut self, duration: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.form.duration = duration.into();
        Ok(())
    }

    /// Sets the severity; values outside 1..=10 are rejected
    pub fn set_severity(&mut self, severity: u8) -> Result<()> {
        self.ensure_editable()?;
        if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
            return Err(MediClearError::Validation(format!(
                "Severity must be between {MIN_SEVERITY} and {MAX_SEVERITY}"
            )));
        }
        self.form.severity = severity;
        Ok(())
    }

    /// Whether the forward gate of the current step is open
    pub fn can_advance(&self) -> bool {
        match self.state {
            WizardState::Symptoms => !self.form.symptoms.trim().is_empty(),
            WizardState::Demographics => {
                !self.form.age.trim().is_empty()
                    && self.form.gender.is_some()
                    && !self.form.duration.trim().is_empty()
            }
            // Severity always has a value; leaving it is an explicit submit
            WizardState::Severity => true,
            WizardState::Submitting | WizardState::Result(_) => false,
        }
    }

    /// Moves one step forward if the gate allows; returns whether it moved
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let next = match self.state {
            WizardState::Symptoms => WizardState::Demographics,
            WizardState::Demographics => WizardState::Severity,
            _ => return false,
        };
        tracing::debug!(from = %self.state, to = %next, "Intake wizard advanced");
        self.state = next;
        true
    }

    /// Moves one step back; returns whether it moved
    pub fn back(&mut self) -> bool {
        let previous = match self.state {
            WizardState::Demographics => WizardState::Symptoms,
            WizardState::Severity => WizardState::Demographics,
            _ => return false,
        };
        self.state = previous;
        true
    }

    /// The payload a submission would send right now
    ///
    /// # Errors
    ///
    /// Returns a validation error if no gender has been selected.
    pub fn build_intake(&self) -> Result<SymptomIntake> {
        let gender = self
            .form
            .gender
            .ok_or_else(|| MediClearError::Validation("Please select a gender".to_string()))?;

        Ok(SymptomIntake {
            symptoms: self.form.symptoms.clone(),
            age: parse_age(&self.form.age),
            gender,
            duration: self.form.duration.clone(),
            severity: self.form.severity,
        })
    }

    /// Submits the intake for analysis
    ///
    /// Only allowed from the severity step. On success the wizard holds the
    /// assessment and the form is cleared. On failure it returns to the
    /// severity step with the error recorded and the fields untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without changing state, when called
    /// outside the severity step; otherwise the gateway's normalized error.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<&SymptomAssessment>
    where
        G: HealthGateway + ?Sized,
    {
        if self.state != WizardState::Severity {
            return Err(MediClearError::Validation(
                "Complete all steps before submitting".to_string(),
            ));
        }

        let intake = self.build_intake()?;
        tracing::info!(
            severity = intake.severity,
            age_parsed = intake.age.is_some(),
            "Submitting symptom intake"
        );

        let guard = SubmitGuard::enter(self);
        let outcome = gateway.analyze_symptoms(&intake).await;
        guard.settle(outcome)
    }

    /// Starts over: every field back to its initial value, back to step one
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

/// Holds the wizard in `Submitting` while the analysis is awaited
///
/// Dropped without [`SubmitGuard::settle`] (the submit future was cancelled),
/// it returns the wizard to the severity step with the form untouched.
struct SubmitGuard<'a> {
    wizard: Option<&'a mut IntakeWizard>,
}

impl<'a> SubmitGuard<'a> {
    fn enter(wizard: &'a mut IntakeWizard) -> Self {
        wizard.error = None;
        wizard.state = WizardState::Submitting;
        Self {
            wizard: Some(wizard),
        }
    }

    fn settle(mut self, outcome: Result<SymptomAssessment>) -> Result<&'a SymptomAssessment> {
        let Some(wizard) = self.wizard.take() else {
            return Err(MediClearError::Validation(
                "Symptom submission already settled".to_string(),
            ));
        };

        match outcome {
            Ok(assessment) => {
                tracing::info!(
                    urgency_level = %assessment.urgency_level,
                    urgency_score = assessment.urgency_score,
                    "Symptom assessment received"
                );
                wizard.form = IntakeForm::default();
                wizard.state = WizardState::Result(Box::new(assessment));
                wizard.assessment().ok_or_else(|| {
                    MediClearError::Validation("Symptom assessment unavailable".to_string())
                })
            }
            Err(e) => {
                wizard.state = WizardState::Severity;
                wizard.error = Some(e.clone());
                Err(e)
            }
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if let Some(wizard) = self.wizard.take() {
            tracing::warn!("Symptom submission abandoned before an answer arrived");
            wizard.state = WizardState::Severity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_severity() -> IntakeWizard {
        let mut wizard = IntakeWizard::new();
        wizard.set_symptoms("fever").unwrap();
        assert!(wizard.next());
        wizard.set_age("34").unwrap();
        wizard.set_gender(Gender::Male).unwrap();
        wizard.set_duration("2 days").unwrap();
        assert!(wizard.next());
        wizard
    }

    #[test]
    fn test_initial_state() {
        let wizard = IntakeWizard::new();
        assert_eq!(wizard.state(), &WizardState::Symptoms);
        assert_eq!(wizard.form().severity, 5);
        assert!(wizard.error().is_none());
    }

    #[test]
    fn test_blank_symptoms_gate_holds() {
        let mut wizard = IntakeWizard::new();
        wizard.set_symptoms("   ").unwrap();
        assert!(!wizard.can_advance());
        assert!(!wizard.next());
        assert_eq!(wizard.state(), &WizardState::Symptoms);
    }

    #[test]
    fn test_demographics_gate_requires_all_fields() {
        let mut wizard = IntakeWizard::new();
        wizard.set_symptoms("cough").unwrap();
        wizard.next();

        wizard.set_age("40").unwrap();
        wizard.set_duration("1 week").unwrap();
        assert!(!wizard.next());

        wizard.set_gender(Gender::Female).unwrap();
        assert!(wizard.next());
        assert_eq!(wizard.state(), &WizardState::Severity);
    }

    #[test]
    fn test_back_preserves_fields() {
        let mut wizard = at_severity();
        let before = wizard.form().clone();
        assert!(wizard.back());
        assert!(wizard.back());
        assert!(!wizard.back());
        assert!(wizard.next());
        assert!(wizard.next());
        assert_eq!(wizard.form(), &before);
    }

    #[test]
    fn test_severity_bounds() {
        let mut wizard = at_severity();
        assert!(wizard.set_severity(0).unwrap_err().is_validation());
        assert!(wizard.set_severity(11).is_err());
        wizard.set_severity(10).unwrap();
        assert_eq!(wizard.form().severity, 10);
    }

    #[test]
    fn test_non_numeric_age_builds_null() {
        let mut wizard = at_severity();
        wizard.back();
        wizard.set_age("thirty").unwrap();
        let intake = wizard.build_intake().unwrap();
        assert_eq!(intake.age, None);
        assert_eq!(serde_json::to_value(&intake).unwrap()["age"], serde_json::Value::Null);
    }

    #[test]
    fn test_abandoned_submission_returns_to_severity() {
        let mut wizard = at_severity();
        wizard.set_severity(7).unwrap();
        let before = wizard.form().clone();

        let guard = SubmitGuard::enter(&mut wizard);
        drop(guard);

        assert_eq!(wizard.state(), &WizardState::Severity);
        assert_eq!(wizard.form(), &before);
        assert!(wizard.set_symptoms("fever and cough").is_ok());
        assert!(wizard.back());
    }

    #[test]
    fn test_settled_failure_keeps_form_and_error() {
        let mut wizard = at_severity();
        let before = wizard.form().clone();

        let err = SubmitGuard::enter(&mut wizard)
            .settle(Err(MediClearError::Server("Age must be at most 120".into())))
            .unwrap_err();
        assert_eq!(err.to_string(), "Age must be at most 120");
        assert_eq!(wizard.state(), &WizardState::Severity);
        assert_eq!(wizard.form(), &before);
        assert_eq!(wizard.error(), Some(&err));

        wizard.dismiss_error();
        assert!(wizard.error().is_none());
    }
}
