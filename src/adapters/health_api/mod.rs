//! MediClear REST API adapter
//!
//! The transport client, the wire models, and the typed gateway built on top
//! of them.

pub mod gateway;
pub mod models;
pub mod transport;

pub use gateway::{HealthGateway, HttpGateway};
pub use transport::{normalize, Operation, RequestBody, TransportClient};
