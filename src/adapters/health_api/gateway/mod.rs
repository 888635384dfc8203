//! Gateway implementations
//!
//! The `HealthGateway` trait defines the typed API surface; `HttpGateway`
//! implements it over HTTP.

pub mod http;
mod r#trait;

pub use http::HttpGateway;
pub use r#trait::HealthGateway;
