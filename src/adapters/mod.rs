//! External system integrations for MediClear.
//!
//! - [`health_api`] - the MediClear REST API (transport, wire models, gateway)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the orchestration
//! layer can be tested against in-memory implementations:
//!
//! ```rust,no_run
//! use mediclear::adapters::health_api::{HealthGateway, HttpGateway};
//! use mediclear::config::MediClearConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway: Arc<dyn HealthGateway> =
//!     Arc::new(HttpGateway::from_config(&MediClearConfig::default())?);
//! let stats = gateway.dashboard_stats().await?;
//! println!("{} records", stats.total_records);
//! # Ok(())
//! # }
//! ```

pub mod health_api;
