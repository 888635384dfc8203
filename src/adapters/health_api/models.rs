//! Wire models for the MediClear REST API
//!
//! The API speaks snake_case JSON. These types mirror the payloads and convert
//! into domain types with `TryFrom`, rejecting values the domain cannot hold
//! (blank identifiers, scores outside 0..=100, malformed dates).

use crate::domain::{
    ChatAnswer, ChatHistory, ChatMessage, ChatRole, HealthTrend, KeyFinding, MedicalRecord,
    NormalRange, PossibleCondition, RecordAnalysis, RecordDetails, RecordId, RecordPage,
    RecordStatus, ReportExplanation, SessionId, SymptomAssessment, TestResult, TrendDirection,
    TrendPoint, UploadReceipt, UrgencyLevel,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of `POST /reports/explain`
#[derive(Debug, Serialize)]
pub struct ExplainRequest<'a> {
    pub record_id: &'a str,
}

/// Body of `POST /chat/ask`
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct AssessmentWire {
    #[serde(default)]
    pub assessment_id: Option<String>,
    pub urgency_level: UrgencyLevel,
    pub urgency_score: i64,
    #[serde(default)]
    pub possible_conditions: Vec<ConditionWire>,
    #[serde(default)]
    pub recommended_tests: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub warning_signs: Vec<String>,
    #[serde(default)]
    pub when_to_seek_care: String,
}

#[derive(Debug, Deserialize)]
pub struct ConditionWire {
    pub condition: String,
    pub probability: i64,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<AssessmentWire> for SymptomAssessment {
    type Error = String;

    fn try_from(wire: AssessmentWire) -> Result<Self, Self::Error> {
        let possible_conditions = wire
            .possible_conditions
            .into_iter()
            .map(|c| {
                Ok(PossibleCondition {
                    probability: percent(c.probability, "probability")?,
                    condition: c.condition,
                    description: c.description,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(SymptomAssessment {
            assessment_id: wire.assessment_id.filter(|id| !id.trim().is_empty()),
            urgency_level: wire.urgency_level,
            urgency_score: percent(wire.urgency_score, "urgency_score")?,
            possible_conditions,
            recommended_tests: wire.recommended_tests,
            action_items: wire.action_items,
            warning_signs: wire.warning_signs,
            when_to_seek_care: wire.when_to_seek_care,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TestResultWire {
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub normal_range: Option<Vec<f64>>,
    pub status: RecordStatus,
}

impl TryFrom<TestResultWire> for TestResult {
    type Error = String;

    fn try_from(wire: TestResultWire) -> Result<Self, Self::Error> {
        let normal_range = match wire.normal_range.as_deref() {
            None | Some([]) => None,
            Some([low, high]) => Some(NormalRange {
                low: *low,
                high: *high,
            }),
            Some(other) => {
                return Err(format!(
                    "normal_range must have two bounds, got {}",
                    other.len()
                ))
            }
        };

        Ok(TestResult {
            value: wire.value,
            unit: wire.unit,
            normal_range,
            status: wire.status,
        })
    }
}

fn convert_parsed_data(
    parsed: BTreeMap<String, TestResultWire>,
) -> Result<BTreeMap<String, TestResult>, String> {
    parsed
        .into_iter()
        .map(|(name, wire)| {
            let result = TestResult::try_from(wire).map_err(|e| format!("{name}: {e}"))?;
            Ok((name, result))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct UploadReceiptWire {
    pub record_id: String,
    #[serde(default)]
    pub message: String,
    pub initial_status: RecordStatus,
    #[serde(default)]
    pub extracted_text: String,
    #[serde(default)]
    pub parsed_data: BTreeMap<String, TestResultWire>,
}

impl TryFrom<UploadReceiptWire> for UploadReceipt {
    type Error = String;

    fn try_from(wire: UploadReceiptWire) -> Result<Self, Self::Error> {
        Ok(UploadReceipt {
            record_id: RecordId::new(wire.record_id)?,
            message: wire.message,
            initial_status: wire.initial_status,
            extracted_text: wire.extracted_text,
            parsed_data: convert_parsed_data(wire.parsed_data)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordSummaryWire {
    pub record_id: String,
    pub record_type: String,
    pub report_date: String,
    pub lab_name: String,
    pub status: RecordStatus,
    pub created_at: String,
}

impl TryFrom<RecordSummaryWire> for MedicalRecord {
    type Error = String;

    fn try_from(wire: RecordSummaryWire) -> Result<Self, Self::Error> {
        Ok(MedicalRecord {
            id: RecordId::new(wire.record_id)?,
            record_type: wire.record_type,
            report_date: parse_date(&wire.report_date)?,
            lab_name: wire.lab_name,
            status: wire.status,
            created_at: parse_timestamp(&wire.created_at)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordPageWire {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub records: Vec<RecordSummaryWire>,
}

impl TryFrom<RecordPageWire> for RecordPage {
    type Error = String;

    fn try_from(wire: RecordPageWire) -> Result<Self, Self::Error> {
        Ok(RecordPage {
            total: wire.total,
            records: wire
                .records
                .into_iter()
                .map(MedicalRecord::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalysisWire {
    #[serde(default, alias = "simple_summary")]
    pub simple_explanation: Option<String>,
    #[serde(default)]
    pub overall_health_score: Option<i64>,
    #[serde(default)]
    pub risk_level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordDetailsWire {
    pub record_id: String,
    pub record_type: String,
    pub report_date: String,
    pub lab_name: String,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub extracted_text: String,
    #[serde(default)]
    pub parsed_data: BTreeMap<String, TestResultWire>,
    #[serde(default)]
    pub analysis: Option<AnalysisWire>,
}

impl TryFrom<RecordDetailsWire> for RecordDetails {
    type Error = String;

    fn try_from(wire: RecordDetailsWire) -> Result<Self, Self::Error> {
        let analysis = match wire.analysis {
            Some(a) => Some(RecordAnalysis {
                simple_explanation: a.simple_explanation,
                overall_health_score: a
                    .overall_health_score
                    .map(|s| percent(s, "overall_health_score"))
                    .transpose()?,
                risk_level: a.risk_level,
            }),
            None => None,
        };

        Ok(RecordDetails {
            id: RecordId::new(wire.record_id)?,
            record_type: wire.record_type,
            report_date: parse_date(&wire.report_date)?,
            lab_name: wire.lab_name,
            status: wire.status,
            created_at: wire.created_at.as_deref().map(parse_timestamp).transpose()?,
            extracted_text: wire.extracted_text,
            parsed_data: convert_parsed_data(wire.parsed_data)?,
            analysis,
        })
    }
}

/// Key findings arrive either as plain sentences or as structured objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum KeyFindingWire {
    Text(String),
    Detailed(DetailedFindingWire),
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailedFindingWire {
    #[serde(default)]
    pub test_name: Option<Value>,
    #[serde(default)]
    pub severity: Option<Value>,
    #[serde(default)]
    pub your_value: Option<Value>,
    #[serde(default)]
    pub normal_range: Option<Value>,
    #[serde(default)]
    pub meaning: Option<Value>,
    #[serde(default)]
    pub action: Option<Value>,
}

impl From<KeyFindingWire> for KeyFinding {
    fn from(wire: KeyFindingWire) -> Self {
        match wire {
            KeyFindingWire::Text(text) => KeyFinding::from_text(text),
            KeyFindingWire::Detailed(d) => KeyFinding {
                test_name: display_value(d.test_name),
                severity: display_value(d.severity),
                your_value: display_value(d.your_value),
                normal_range: display_value(d.normal_range),
                meaning: display_value(d.meaning),
                action: display_value(d.action),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExplanationWire {
    #[serde(default)]
    pub simple_summary: String,
    pub overall_health_score: i64,
    #[serde(default)]
    pub key_findings: Vec<KeyFindingWire>,
    #[serde(default)]
    pub positive_findings: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub risk_level: String,
}

/// The explanation is normally wrapped in `{"explanation": ...}`; older
/// servers return it bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ExplainResponseWire {
    Wrapped { explanation: ExplanationWire },
    Bare(ExplanationWire),
}

impl TryFrom<ExplainResponseWire> for ReportExplanation {
    type Error = String;

    fn try_from(wire: ExplainResponseWire) -> Result<Self, Self::Error> {
        let wire = match wire {
            ExplainResponseWire::Wrapped { explanation } => explanation,
            ExplainResponseWire::Bare(explanation) => explanation,
        };

        Ok(ReportExplanation {
            simple_summary: wire.simple_summary,
            overall_health_score: percent(wire.overall_health_score, "overall_health_score")?,
            key_findings: wire.key_findings.into_iter().map(KeyFinding::from).collect(),
            positive_findings: wire.positive_findings,
            concerns: wire.concerns,
            next_steps: wire.next_steps,
            risk_level: wire.risk_level,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TrendPointWire {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct TrendWire {
    pub test_name: String,
    pub trend_direction: TrendDirection,
    #[serde(default)]
    pub historical_values: Vec<TrendPointWire>,
    #[serde(default)]
    pub velocity: f64,
    #[serde(default)]
    pub forecast: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TrendsResponseWire {
    #[serde(default)]
    pub test_trends: Vec<TrendWire>,
}

impl TryFrom<TrendWire> for HealthTrend {
    type Error = String;

    fn try_from(wire: TrendWire) -> Result<Self, Self::Error> {
        let historical_values = wire
            .historical_values
            .into_iter()
            .map(|p| {
                Ok(TrendPoint {
                    date: parse_date(&p.date)?,
                    value: p.value,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(HealthTrend {
            test_name: wire.test_name,
            trend_direction: wire.trend_direction,
            historical_values,
            velocity: wire.velocity,
            forecast: wire
                .forecast
                .map(|f| display_value(Some(f)))
                .filter(|f| !f.is_empty()),
        })
    }
}

impl TrendsResponseWire {
    /// Converts every trend, failing on the first malformed one
    pub fn into_trends(self) -> Result<Vec<HealthTrend>, String> {
        self.test_trends
            .into_iter()
            .map(HealthTrend::try_from)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatAnswerWire {
    pub session_id: String,
    pub answer: String,
    #[serde(default)]
    pub referenced_records: Vec<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub follow_up_suggestions: Vec<String>,
}

impl TryFrom<ChatAnswerWire> for ChatAnswer {
    type Error = String;

    fn try_from(wire: ChatAnswerWire) -> Result<Self, Self::Error> {
        Ok(ChatAnswer {
            session_id: SessionId::new(wire.session_id)?,
            answer: wire.answer,
            referenced_records: wire.referenced_records,
            confidence_score: wire.confidence_score,
            follow_up_suggestions: wire.follow_up_suggestions,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatMessageWire {
    pub timestamp: String,
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatHistoryWire {
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessageWire>,
}

impl TryFrom<ChatHistoryWire> for ChatHistory {
    type Error = String;

    fn try_from(wire: ChatHistoryWire) -> Result<Self, Self::Error> {
        let messages = wire
            .messages
            .into_iter()
            .map(|m| {
                Ok(ChatMessage {
                    timestamp: parse_timestamp(&m.timestamp)?,
                    role: m.role,
                    content: m.content,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(ChatHistory {
            session_id: SessionId::new(wire.session_id)?,
            messages,
        })
    }
}

fn percent(value: i64, field: &str) -> Result<u8, String> {
    if (0..=100).contains(&value) {
        Ok(value as u8)
    } else {
        Err(format!("{field} must be between 0 and 100, got {value}"))
    }
}

fn display_value(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Accepts RFC 3339, or a naive ISO timestamp which is taken as UTC
fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, NAIVE_TIMESTAMP_FORMAT) {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Utc.from_utc_datetime(&midnight));
    }
    Err(format!("invalid timestamp '{text}'"))
}

/// Accepts a plain `YYYY-MM-DD` date or any timestamp [`parse_timestamp`] accepts
fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| parse_timestamp(text).map(|ts| ts.date_naive()))
        .map_err(|_| format!("invalid date '{text}'"))
}
