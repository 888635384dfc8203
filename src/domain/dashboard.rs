//! Dashboard statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate usage and health statistics
///
/// The server's payload is loosely specified, so every known field defaults
/// when missing and unknown fields are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of uploaded records
    #[serde(default)]
    pub total_records: u64,

    /// Number of generated report explanations
    #[serde(default)]
    pub total_explanations: u64,

    /// Number of chat sessions
    #[serde(default)]
    pub total_chat_sessions: u64,

    /// Record counts keyed by status label
    #[serde(default)]
    pub records_by_status: BTreeMap<String, u64>,

    /// Mean health score across explained reports
    #[serde(default)]
    pub average_health_score: Option<f64>,

    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
