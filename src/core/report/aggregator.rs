//! Report aggregation
//!
//! A report view joins three independent calls: the record itself, which is
//! mandatory, and its explanation and trends, which are optional. All three run
//! concurrently and the view is built once every one of them has settled.

use crate::adapters::health_api::HealthGateway;
use crate::domain::{
    HealthTrend, MediClearError, RecordDetails, RecordId, ReportExplanation, Result,
};
use futures::future::join3;
use serde::Serialize;
use std::sync::Arc;

/// Empty-state message for a report without trend data
pub const NO_TRENDS_MESSAGE: &str = "No trend data available for this report yet.";

/// Everything the report screen shows for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedReportView {
    pub record: RecordDetails,
    pub explanation: Option<ReportExplanation>,
    pub trends: Vec<HealthTrend>,
}

impl AggregatedReportView {
    pub fn has_explanation(&self) -> bool {
        self.explanation.is_some()
    }

    pub fn has_trends(&self) -> bool {
        !self.trends.is_empty()
    }

    /// Trend of one test, matched case-insensitively
    pub fn trend_for(&self, test_name: &str) -> Option<&HealthTrend> {
        self.trends
            .iter()
            .find(|trend| trend.test_name.eq_ignore_ascii_case(test_name))
    }

    /// Message to show instead of the trend section, if it is empty
    pub fn trends_placeholder(&self) -> Option<&'static str> {
        if self.has_trends() {
            None
        } else {
            Some(NO_TRENDS_MESSAGE)
        }
    }
}

/// Outcome of an optional call once it has settled
#[derive(Debug)]
enum Settled<T> {
    Ready(T),
    Absent,
}

impl<T> Settled<T> {
    fn absorb(result: Result<T>, part: &'static str, record_id: &RecordId) -> Self {
        match result {
            Ok(value) => Settled::Ready(value),
            Err(e) => {
                tracing::warn!(
                    record_id = %record_id,
                    part,
                    error = %e,
                    "Optional report part unavailable"
                );
                Settled::Absent
            }
        }
    }

    fn into_option(self) -> Option<T> {
        match self {
            Settled::Ready(value) => Some(value),
            Settled::Absent => None,
        }
    }
}

/// Loads report views through a gateway
pub struct ReportAggregator {
    gateway: Arc<dyn HealthGateway>,
}

impl ReportAggregator {
    pub fn new(gateway: Arc<dyn HealthGateway>) -> Self {
        Self { gateway }
    }

    /// Loads the record, its explanation and its trends concurrently
    ///
    /// # Errors
    ///
    /// Fails with [`MediClearError::ReportDetails`] only when the record
    /// itself cannot be loaded. Explanation and trend failures are logged and
    /// leave those parts empty.
    pub async fn load_report(&self, record_id: &RecordId) -> Result<AggregatedReportView> {
        tracing::debug!(record_id = %record_id, "Loading report");

        let (record, explanation, trends) = join3(
            self.gateway.get_record_details(record_id),
            self.gateway.explain_report(record_id),
            self.gateway.get_health_trends(record_id),
        )
        .await;

        let record = record.map_err(|e| {
            crate::log_error_with_context!(&e, "report details unavailable");
            MediClearError::ReportDetails {
                source: Box::new(e),
            }
        })?;
        let explanation = Settled::absorb(explanation, "explanation", record_id).into_option();
        let trends = Settled::absorb(trends, "trends", record_id)
            .into_option()
            .unwrap_or_default();

        Ok(AggregatedReportView {
            record,
            explanation,
            trends,
        })
    }
}
