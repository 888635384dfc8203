//! Symptoms command implementation
//!
//! Runs the intake wizard non-interactively: each step is filled from the
//! command-line arguments and the wizard's gates decide whether it advances.

use super::{connect_or_report, print_json, print_list, report_failure, GlobalOptions};
use crate::core::intake::IntakeWizard;
use crate::domain::symptoms::DEFAULT_SEVERITY;
use crate::domain::{Gender, MediClearError, SymptomAssessment};
use clap::Args;

/// Arguments for the symptoms command
#[derive(Args, Debug)]
pub struct SymptomsArgs {
    /// Free-text description of the symptoms
    #[arg(short, long)]
    pub symptoms: String,

    /// Age in years
    #[arg(short, long)]
    pub age: String,

    /// Gender (male, female, other)
    #[arg(short, long)]
    pub gender: Gender,

    /// How long the symptoms have lasted, e.g. "2 days"
    #[arg(short, long)]
    pub duration: String,

    /// Severity from 1 to 10
    #[arg(long, default_value_t = DEFAULT_SEVERITY)]
    pub severity: u8,

    /// Print the assessment as JSON
    #[arg(long)]
    pub json: bool,
}

impl SymptomsArgs {
    /// Fills the wizard step by step, stopping at the first closed gate
    fn fill(&self, wizard: &mut IntakeWizard) -> Result<(), MediClearError> {
        wizard.set_symptoms(self.symptoms.as_str())?;
        if !wizard.next() {
            return Err(MediClearError::Validation(
                "Please describe your symptoms".to_string(),
            ));
        }

        wizard.set_age(self.age.as_str())?;
        wizard.set_gender(self.gender)?;
        wizard.set_duration(self.duration.as_str())?;
        if !wizard.next() {
            return Err(MediClearError::Validation(
                "Please provide your age, gender and symptom duration".to_string(),
            ));
        }

        wizard.set_severity(self.severity)
    }

    /// Execute the symptoms command
    pub async fn execute(&self, options: &GlobalOptions) -> anyhow::Result<i32> {
        tracing::info!("Starting symptom intake");

        let mut wizard = IntakeWizard::new();
        if let Err(e) = self.fill(&mut wizard) {
            return Ok(report_failure(&e));
        }

        let gateway = match connect_or_report(options) {
            Ok(gateway) => gateway,
            Err(code) => return Ok(code),
        };

        println!("🩺 Analyzing symptoms...");
        match wizard.submit(gateway.as_ref()).await {
            Ok(assessment) => {
                if self.json {
                    print_json(assessment)?;
                } else {
                    print_assessment(assessment);
                }
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}

fn print_assessment(assessment: &SymptomAssessment) {
    println!();
    println!(
        "Urgency: {} ({}/10)",
        assessment.urgency_level, assessment.urgency_score
    );
    println!();

    if !assessment.possible_conditions.is_empty() {
        println!("Possible conditions:");
        for condition in &assessment.possible_conditions {
            println!(
                "  • {} ({}%): {}",
                condition.condition, condition.probability, condition.description
            );
        }
    }
    print_list("Recommended tests", &assessment.recommended_tests);
    print_list("What to do", &assessment.action_items);
    print_list("Warning signs", &assessment.warning_signs);
    if !assessment.when_to_seek_care.is_empty() {
        println!("When to seek care: {}", assessment.when_to_seek_care);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::intake::WizardState;

    fn args(symptoms: &str, age: &str, duration: &str, severity: u8) -> SymptomsArgs {
        SymptomsArgs {
            symptoms: symptoms.to_string(),
            age: age.to_string(),
            gender: Gender::Male,
            duration: duration.to_string(),
            severity,
            json: false,
        }
    }

    #[test]
    fn test_fill_reaches_severity() {
        let mut wizard = IntakeWizard::new();
        args("fever", "34", "2 days", 5).fill(&mut wizard).unwrap();
        assert_eq!(wizard.state(), &WizardState::Severity);
        assert_eq!(wizard.form().severity, 5);
    }

    #[test]
    fn test_fill_stops_on_blank_symptoms() {
        let mut wizard = IntakeWizard::new();
        let err = args("   ", "34", "2 days", 5).fill(&mut wizard).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(wizard.state(), &WizardState::Symptoms);
    }

    #[test]
    fn test_fill_stops_on_missing_duration() {
        let mut wizard = IntakeWizard::new();
        let err = args("fever", "34", "", 5).fill(&mut wizard).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(wizard.state(), &WizardState::Demographics);
    }

    #[test]
    fn test_fill_rejects_out_of_range_severity() {
        let mut wizard = IntakeWizard::new();
        assert!(args("fever", "34", "2 days", 11).fill(&mut wizard).is_err());
    }
}
