//! Domain models and types for MediClear.
//!
//! This module contains the types every other layer speaks: identifiers,
//! intake and assessment models, records, report explanations and trends,
//! chat messages, and the shared error contract.
//!
//! # Overview
//!
//! - **Strongly-typed identifiers** ([`RecordId`], [`SessionId`])
//! - **Domain models** ([`SymptomAssessment`], [`RecordDetails`], [`ReportExplanation`], ...)
//! - **Error types** ([`MediClearError`], [`TransportError`])
//! - **Result type alias** ([`Result`])
//!
//! Wire formats are not defined here. The adapter layer decodes the API's
//! snake_case payloads into these types and validates them on the way in.
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MediClearError>`]:
//!
//! ```rust
//! use mediclear::domain::{MediClearError, Result};
//!
//! fn require_symptoms(text: &str) -> Result<()> {
//!     if text.trim().is_empty() {
//!         return Err(MediClearError::Validation("Please describe your symptoms".into()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod dashboard;
pub mod errors;
pub mod ids;
pub mod records;
pub mod reports;
pub mod result;
pub mod symptoms;

// Re-export commonly used types for convenience
pub use chat::{ChatAnswer, ChatHistory, ChatMessage, ChatRole};
pub use dashboard::DashboardStats;
pub use errors::{MediClearError, TransportError};
pub use ids::{RecordId, SessionId};
pub use records::{
    MedicalRecord, NormalRange, RecordAnalysis, RecordDetails, RecordPage, RecordQuery,
    RecordStatus, RecordUpload, RecordUploadBuilder, TestResult, UploadPolicy, UploadReceipt,
};
pub use reports::{HealthTrend, KeyFinding, ReportExplanation, TrendDirection, TrendPoint};
pub use result::Result;
pub use symptoms::{Gender, PossibleCondition, SymptomAssessment, SymptomIntake, UrgencyLevel};
