//! Report explanation and health trend domain models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One finding in a report explanation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyFinding {
    /// Test the finding is about
    pub test_name: String,
    /// Severity label as sent by the server
    pub severity: String,
    /// The patient's value, formatted for display
    pub your_value: String,
    /// Reference interval, formatted for display
    pub normal_range: String,
    /// What the value means
    pub meaning: String,
    /// What to do about it
    pub action: String,
}

impl KeyFinding {
    /// A finding that only carries free text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            meaning: text.into(),
            ..Default::default()
        }
    }
}

/// Plain-language explanation of a record
///
/// Optional on the report view: a record without one is still displayable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportExplanation {
    /// Short summary
    pub simple_summary: String,
    /// Overall health score (0..=100)
    pub overall_health_score: u8,
    /// Findings, in server order
    pub key_findings: Vec<KeyFinding>,
    /// Things that look good
    pub positive_findings: Vec<String>,
    /// Things that need attention
    pub concerns: Vec<String>,
    /// Suggested next steps
    pub next_steps: Vec<String>,
    /// Risk level label
    pub risk_level: String,
}

/// Direction of a test value over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    /// Moving toward the normal range
    Improving,
    /// Moving away from the normal range
    Worsening,
    /// No meaningful change
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Improving => "IMPROVING",
            TrendDirection::Worsening => "WORSENING",
            TrendDirection::Stable => "STABLE",
        };
        f.write_str(label)
    }
}

/// One historical measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Measurement date
    pub date: NaiveDate,
    /// Measured value
    pub value: f64,
}

/// Time series for a single test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthTrend {
    /// Test name
    pub test_name: String,
    /// Overall direction
    pub trend_direction: TrendDirection,
    /// Measurements, oldest first
    pub historical_values: Vec<TrendPoint>,
    /// Rate of change (signed)
    pub velocity: f64,
    /// Optional projection
    pub forecast: Option<String>,
}

impl HealthTrend {
    /// Most recent measurement, if any
    pub fn latest(&self) -> Option<&TrendPoint> {
        self.historical_values.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_finding_from_text() {
        let finding = KeyFinding::from_text("Glucose is slightly high");
        assert_eq!(finding.meaning, "Glucose is slightly high");
        assert!(finding.test_name.is_empty());
    }

    #[test]
    fn test_trend_direction_wire_format() {
        let direction: TrendDirection = serde_json::from_str("\"WORSENING\"").unwrap();
        assert_eq!(direction, TrendDirection::Worsening);
        assert_eq!(direction.to_string(), "WORSENING");
    }

    #[test]
    fn test_latest_point() {
        let trend = HealthTrend {
            test_name: "Hemoglobin".into(),
            trend_direction: TrendDirection::Stable,
            historical_values: vec![
                TrendPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    value: 13.1,
                },
                TrendPoint {
                    date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                    value: 13.4,
                },
            ],
            velocity: 0.1,
            forecast: None,
        };
        assert_eq!(trend.latest().map(|p| p.value), Some(13.4));
    }
}
