//! Health gateway trait definition
//!
//! `HealthGateway` is the seam between the orchestration layer and the REST
//! API. Wizards, chat sessions and report aggregation only ever talk to this
//! trait, which keeps them testable against in-memory fakes.

use crate::domain::{
    ChatAnswer, ChatHistory, DashboardStats, HealthTrend, RecordDetails, RecordId, RecordPage,
    RecordQuery, RecordUpload, ReportExplanation, Result, SessionId, SymptomAssessment,
    SymptomIntake, UploadReceipt,
};
use async_trait::async_trait;

/// Typed operations offered by the MediClear API
///
/// Every error returned by an implementation is already normalized: a
/// [`MediClearError::Validation`](crate::domain::MediClearError::Validation)
/// for local pre-flight failures, a `Server` error carrying the server's
/// `detail`, or an operation-prefixed `Transport` error.
///
/// # Example
///
/// ```no_run
/// use mediclear::adapters::health_api::{HealthGateway, HttpGateway};
/// use mediclear::config::MediClearConfig;
/// use mediclear::domain::RecordQuery;
///
/// # async fn example() -> mediclear::domain::Result<()> {
/// let gateway = HttpGateway::from_config(&MediClearConfig::default())?;
/// let page = gateway.list_records(&RecordQuery::default()).await?;
/// println!("{} records", page.total);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait HealthGateway: Send + Sync {
    /// Submit a symptom intake for analysis
    async fn analyze_symptoms(&self, intake: &SymptomIntake) -> Result<SymptomAssessment>;

    /// Upload a record file with its metadata
    ///
    /// # Errors
    ///
    /// Returns a validation error, without any network call, when the file
    /// violates the upload policy.
    async fn upload_record(&self, upload: RecordUpload) -> Result<UploadReceipt>;

    /// List record summaries, one page at a time
    async fn list_records(&self, query: &RecordQuery) -> Result<RecordPage>;

    /// Fetch the full details of one record
    async fn get_record_details(&self, record_id: &RecordId) -> Result<RecordDetails>;

    /// Ask the server to explain a record in plain language
    async fn explain_report(&self, record_id: &RecordId) -> Result<ReportExplanation>;

    /// Fetch historical trends for the tests in a record
    async fn get_health_trends(&self, record_id: &RecordId) -> Result<Vec<HealthTrend>>;

    /// Ask a question, optionally continuing an existing session
    async fn ask_question(
        &self,
        question: &str,
        session_id: Option<&SessionId>,
    ) -> Result<ChatAnswer>;

    /// Fetch the stored conversation of a session
    async fn get_chat_history(&self, session_id: &SessionId) -> Result<ChatHistory>;

    /// Fetch aggregate dashboard statistics
    async fn dashboard_stats(&self) -> Result<DashboardStats>;

    /// Base URL of the API this gateway talks to
    fn base_url(&self) -> &str;
}
