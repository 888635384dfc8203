//! Report view aggregation under a partial-failure policy

pub mod aggregator;

pub use aggregator::{AggregatedReportView, ReportAggregator, NO_TRENDS_MESSAGE};
