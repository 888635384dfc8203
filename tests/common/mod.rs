//! Shared helpers for the orchestration integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use mediclear::adapters::health_api::HealthGateway;
use mediclear::domain::{
    ChatAnswer, ChatHistory, ChatMessage, DashboardStats, HealthTrend, MediClearError, PossibleCondition,
    RecordDetails, RecordId, RecordPage, RecordQuery, RecordUpload, ReportExplanation, Result,
    SessionId, SymptomAssessment, SymptomIntake, TrendDirection, TrendPoint, UploadReceipt,
    UrgencyLevel,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Gateway that replays queued results and counts calls
#[derive(Default)]
pub struct StubGateway {
    pub assessments: Mutex<VecDeque<Result<SymptomAssessment>>>,
    pub details: Mutex<VecDeque<Result<RecordDetails>>>,
    pub explanations: Mutex<VecDeque<Result<ReportExplanation>>>,
    pub trends: Mutex<VecDeque<Result<Vec<HealthTrend>>>>,
    pub answers: Mutex<VecDeque<Result<ChatAnswer>>>,
    pub histories: Mutex<VecDeque<Result<ChatHistory>>>,
    pub intakes: Mutex<Vec<SymptomIntake>>,
    pub questions: Mutex<Vec<(String, Option<SessionId>)>>,
    pub calls: AtomicUsize,
    /// When set, symptom analysis never answers
    pub stall_analysis: AtomicBool,
    /// When set, every ask waits for one permit
    pub ask_gate: Option<Arc<Semaphore>>,
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T>>>, prefix: &str) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(MediClearError::Transport(format!("{prefix}: Network Error"))))
}

impl StubGateway {
    pub fn push_assessment(&self, result: Result<SymptomAssessment>) {
        self.assessments.lock().unwrap().push_back(result);
    }

    pub fn push_details(&self, result: Result<RecordDetails>) {
        self.details.lock().unwrap().push_back(result);
    }

    pub fn push_explanation(&self, result: Result<ReportExplanation>) {
        self.explanations.lock().unwrap().push_back(result);
    }

    pub fn push_trends(&self, result: Result<Vec<HealthTrend>>) {
        self.trends.lock().unwrap().push_back(result);
    }

    pub fn push_answer(&self, result: Result<ChatAnswer>) {
        self.answers.lock().unwrap().push_back(result);
    }

    pub fn push_history(&self, result: Result<ChatHistory>) {
        self.histories.lock().unwrap().push_back(result);
    }

    pub fn with_ask_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.ask_gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HealthGateway for StubGateway {
    async fn analyze_symptoms(&self, intake: &SymptomIntake) -> Result<SymptomAssessment> {
        self.count();
        self.intakes.lock().unwrap().push(intake.clone());
        if self.stall_analysis.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        pop(&self.assessments, "Failed to analyze symptoms")
    }

    async fn upload_record(&self, _upload: RecordUpload) -> Result<UploadReceipt> {
        self.count();
        Err(MediClearError::Transport("Failed to upload record: Network Error".into()))
    }

    async fn list_records(&self, _query: &RecordQuery) -> Result<RecordPage> {
        self.count();
        Ok(RecordPage {
            total: 0,
            records: Vec::new(),
        })
    }

    async fn get_record_details(&self, _record_id: &RecordId) -> Result<RecordDetails> {
        self.count();
        pop(&self.details, "Failed to fetch record details")
    }

    async fn explain_report(&self, _record_id: &RecordId) -> Result<ReportExplanation> {
        self.count();
        pop(&self.explanations, "Failed to explain report")
    }

    async fn get_health_trends(&self, _record_id: &RecordId) -> Result<Vec<HealthTrend>> {
        self.count();
        pop(&self.trends, "Failed to fetch health trends")
    }

    async fn ask_question(
        &self,
        question: &str,
        session_id: Option<&SessionId>,
    ) -> Result<ChatAnswer> {
        self.count();
        self.questions
            .lock()
            .unwrap()
            .push((question.to_string(), session_id.cloned()));
        if let Some(gate) = &self.ask_gate {
            gate.acquire().await.unwrap().forget();
        }
        pop(&self.answers, "Failed to get answer")
    }

    async fn get_chat_history(&self, _session_id: &SessionId) -> Result<ChatHistory> {
        self.count();
        pop(&self.histories, "Failed to fetch chat history")
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.count();
        Ok(DashboardStats::default())
    }

    fn base_url(&self) -> &str {
        "stub://"
    }
}

pub fn assessment(urgency_level: UrgencyLevel, urgency_score: u8) -> SymptomAssessment {
    SymptomAssessment {
        assessment_id: None,
        urgency_level,
        urgency_score,
        possible_conditions: vec![PossibleCondition {
            condition: "Common cold".into(),
            probability: 55,
            description: "Viral infection of the upper airways".into(),
        }],
        recommended_tests: Vec::new(),
        action_items: vec!["Rest".into()],
        warning_signs: Vec::new(),
        when_to_seek_care: "If symptoms worsen".into(),
    }
}

pub fn details(id: &str) -> RecordDetails {
    RecordDetails {
        id: RecordId::new(id).unwrap(),
        record_type: "blood_test".into(),
        report_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        lab_name: "Northside Diagnostics".into(),
        status: None,
        created_at: None,
        extracted_text: String::new(),
        parsed_data: BTreeMap::new(),
        analysis: None,
    }
}

pub fn explanation(score: u8) -> ReportExplanation {
    ReportExplanation {
        simple_summary: "Results look good overall.".into(),
        overall_health_score: score,
        key_findings: Vec::new(),
        positive_findings: vec!["Healthy cholesterol".into()],
        concerns: Vec::new(),
        next_steps: Vec::new(),
        risk_level: "LOW".into(),
    }
}

pub fn trend(test_name: &str, direction: TrendDirection) -> HealthTrend {
    HealthTrend {
        test_name: test_name.into(),
        trend_direction: direction,
        historical_values: vec![TrendPoint {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            value: 100.0,
        }],
        velocity: 0.0,
        forecast: None,
    }
}

pub fn answer(session_id: &str, text: &str) -> ChatAnswer {
    ChatAnswer {
        session_id: SessionId::new(session_id).unwrap(),
        answer: text.into(),
        referenced_records: Vec::new(),
        confidence_score: None,
        follow_up_suggestions: vec!["What should I eat?".into()],
    }
}

pub fn history(session_id: &str, messages: Vec<ChatMessage>) -> ChatHistory {
    ChatHistory {
        session_id: SessionId::new(session_id).unwrap(),
        messages,
    }
}
