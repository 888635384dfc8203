//! Symptom intake
//!
//! A gated, three-step wizard that assembles a [`SymptomIntake`](crate::domain::SymptomIntake)
//! and submits it for analysis.

pub mod wizard;

pub use wizard::{IntakeForm, IntakeWizard, WizardState};
