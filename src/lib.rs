// MediClear - Personal Health Assistant Client
// Copyright (c) 2025 MediClear Contributors
// Licensed under the MIT License

//! # MediClear - Personal Health Assistant Client
//!
//! MediClear talks to a personal-health assistant service: it collects
//! symptom descriptions, uploads lab reports, shows plain-language report
//! explanations with test trends, and hosts a question-answering
//! conversation grounded in the user's records.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Session and orchestration (intake wizard, chat, report aggregation)
//! - [`adapters`] - The MediClear REST API (transport, wire models, gateway)
//! - [`domain`] - Core domain types and the error contract
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mediclear::adapters::health_api::{HealthGateway, HttpGateway};
//! use mediclear::config::load_config_or_default;
//! use mediclear::core::intake::IntakeWizard;
//! use mediclear::domain::Gender;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("mediclear.toml")?;
//!     let gateway = HttpGateway::from_config(&config)?;
//!
//!     let mut wizard = IntakeWizard::new();
//!     wizard.set_symptoms("fever and headache")?;
//!     wizard.next();
//!     wizard.set_age("34")?;
//!     wizard.set_gender(Gender::Male)?;
//!     wizard.set_duration("2 days")?;
//!     wizard.next();
//!
//!     let assessment = wizard.submit(&gateway).await?;
//!     println!("Urgency: {}", assessment.urgency_level);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure reaching a caller is a [`domain::MediClearError`] whose
//! display text is ready to show:
//!
//! ```rust,no_run
//! use mediclear::domain::MediClearError;
//!
//! fn describe(error: &MediClearError) -> String {
//!     match error {
//!         MediClearError::Validation(message) => format!("Check your input: {message}"),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! MediClear uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting upload");
//! warn!(record_id = "r-1", "No trend data");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
