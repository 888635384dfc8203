//! Core orchestration for MediClear.
//!
//! The session and orchestration layer that sits between callers and the
//! [`HealthGateway`](crate::adapters::health_api::HealthGateway).
//!
//! # Modules
//!
//! - [`intake`] - Gated three-step symptom intake wizard
//! - [`chat`] - Conversational session with serialized asks
//! - [`report`] - Record, explanation and trend aggregation
//!
//! # Example
//!
//! ```rust,no_run
//! use mediclear::adapters::health_api::{HealthGateway, HttpGateway};
//! use mediclear::config::load_config_or_default;
//! use mediclear::core::report::ReportAggregator;
//! use mediclear::domain::RecordId;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("mediclear.toml")?;
//! let gateway: Arc<dyn HealthGateway> = Arc::new(HttpGateway::from_config(&config)?);
//!
//! let view = ReportAggregator::new(gateway)
//!     .load_report(&RecordId::new("r-1")?)
//!     .await?;
//! println!("Explanation available: {}", view.has_explanation());
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod intake;
pub mod report;
