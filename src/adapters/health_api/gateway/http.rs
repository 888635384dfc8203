//! HTTP implementation of the health gateway

use super::HealthGateway;
use crate::adapters::health_api::models::{
    AskRequest, AssessmentWire, ChatAnswerWire, ChatHistoryWire, ExplainRequest,
    ExplainResponseWire, RecordDetailsWire, RecordPageWire, TrendsResponseWire,
    UploadReceiptWire,
};
use crate::adapters::health_api::transport::{
    decode, normalize, Operation, RequestBody, TransportClient,
};
use crate::config::MediClearConfig;
use crate::domain::{
    ChatAnswer, ChatHistory, DashboardStats, HealthTrend, MediClearError, RecordDetails,
    RecordId, RecordPage, RecordQuery, RecordUpload, ReportExplanation, Result, SessionId,
    SymptomAssessment, SymptomIntake, TransportError, UploadPolicy, UploadReceipt,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Gateway backed by the MediClear REST API
///
/// # Example
///
/// ```no_run
/// use mediclear::adapters::health_api::{HealthGateway, HttpGateway};
/// use mediclear::config::MediClearConfig;
/// use mediclear::domain::RecordId;
///
/// # async fn example() -> mediclear::domain::Result<()> {
/// let gateway = HttpGateway::from_config(&MediClearConfig::default())?;
/// let record_id = RecordId::new("0b6c1d0e").map_err(mediclear::domain::MediClearError::Validation)?;
/// let details = gateway.get_record_details(&record_id).await?;
/// println!("{}", details.lab_name);
/// # Ok(())
/// # }
/// ```
pub struct HttpGateway {
    transport: TransportClient,
    upload_policy: UploadPolicy,
}

impl HttpGateway {
    /// Create a gateway from a transport and an upload policy
    pub fn new(transport: TransportClient, upload_policy: UploadPolicy) -> Self {
        Self {
            transport,
            upload_policy,
        }
    }

    /// Create a gateway from the full client configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn from_config(config: &MediClearConfig) -> Result<Self> {
        let transport = TransportClient::new(&config.api)?;
        Ok(Self::new(transport, config.upload.policy()))
    }

    /// The upload policy enforced before any upload request
    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.upload_policy
    }

    /// Sends one request and converts the body through wire type `W`
    async fn call<W, T>(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        body: RequestBody,
        query: &[(&str, String)],
    ) -> Result<T>
    where
        W: DeserializeOwned + Send,
        T: TryFrom<W, Error = String> + Send,
    {
        let outcome: std::result::Result<T, TransportError> = async {
            let value = self.transport.send(method, path, body, query).await?;
            let wire: W = decode(value)?;
            T::try_from(wire).map_err(TransportError::InvalidResponse)
        }
        .await;

        outcome.map_err(|e| {
            let error = normalize(operation, e);
            tracing::warn!(operation = %operation, error = %error, "Gateway operation failed");
            error
        })
    }

    fn json_body<S: serde::Serialize>(operation: Operation, body: &S) -> Result<RequestBody> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(|e| normalize(operation, TransportError::InvalidResponse(e.to_string())))
    }

    fn upload_form(upload: RecordUpload) -> Result<Form> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|_| {
                MediClearError::Validation(format!(
                    "Invalid content type '{}'",
                    upload.content_type
                ))
            })?;

        let mut form = Form::new()
            .part("file", part)
            .text("record_type", upload.record_type)
            .text("report_date", upload.report_date.format("%Y-%m-%d").to_string())
            .text("lab_name", upload.lab_name);
        if let Some(notes) = upload.notes {
            form = form.text("notes", notes);
        }
        Ok(form)
    }
}

#[async_trait]
impl HealthGateway for HttpGateway {
    async fn analyze_symptoms(&self, intake: &SymptomIntake) -> Result<SymptomAssessment> {
        let body = Self::json_body(Operation::AnalyzeSymptoms, intake)?;
        self.call::<AssessmentWire, _>(
            Operation::AnalyzeSymptoms,
            Method::POST,
            "/symptoms/analyze",
            body,
            &[],
        )
        .await
    }

    async fn upload_record(&self, upload: RecordUpload) -> Result<UploadReceipt> {
        self.upload_policy.validate(&upload)?;

        tracing::info!(
            file_name = %upload.file_name,
            size_bytes = upload.size_bytes(),
            record_type = %upload.record_type,
            "Uploading record"
        );

        let form = Self::upload_form(upload)?;
        self.call::<UploadReceiptWire, _>(
            Operation::UploadRecord,
            Method::POST,
            "/records/upload",
            RequestBody::Multipart(form),
            &[],
        )
        .await
    }

    async fn list_records(&self, query: &RecordQuery) -> Result<RecordPage> {
        self.call::<RecordPageWire, _>(
            Operation::ListRecords,
            Method::GET,
            "/records",
            RequestBody::Empty,
            &query.to_query_pairs(),
        )
        .await
    }

    async fn get_record_details(&self, record_id: &RecordId) -> Result<RecordDetails> {
        let path = format!("/records/{}", record_id);
        self.call::<RecordDetailsWire, _>(
            Operation::GetRecordDetails,
            Method::GET,
            &path,
            RequestBody::Empty,
            &[],
        )
        .await
    }

    async fn explain_report(&self, record_id: &RecordId) -> Result<ReportExplanation> {
        let body = Self::json_body(
            Operation::ExplainReport,
            &ExplainRequest {
                record_id: record_id.as_str(),
            },
        )?;
        self.call::<ExplainResponseWire, _>(
            Operation::ExplainReport,
            Method::POST,
            "/reports/explain",
            body,
            &[],
        )
        .await
    }

    async fn get_health_trends(&self, record_id: &RecordId) -> Result<Vec<HealthTrend>> {
        let path = format!("/reports/{}/trends", record_id);
        self.call::<TrendsResponseWire, TrendList>(
            Operation::GetHealthTrends,
            Method::GET,
            &path,
            RequestBody::Empty,
            &[],
        )
        .await
        .map(|list| list.0)
    }

    async fn ask_question(
        &self,
        question: &str,
        session_id: Option<&SessionId>,
    ) -> Result<ChatAnswer> {
        let body = Self::json_body(
            Operation::AskQuestion,
            &AskRequest {
                question,
                session_id: session_id.map(SessionId::as_str),
            },
        )?;
        self.call::<ChatAnswerWire, _>(
            Operation::AskQuestion,
            Method::POST,
            "/chat/ask",
            body,
            &[],
        )
        .await
    }

    async fn get_chat_history(&self, session_id: &SessionId) -> Result<ChatHistory> {
        let path = format!("/chat/history/{}", session_id);
        self.call::<ChatHistoryWire, _>(
            Operation::GetChatHistory,
            Method::GET,
            &path,
            RequestBody::Empty,
            &[],
        )
        .await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.call::<DashboardWire, DashboardStats>(
            Operation::DashboardStats,
            Method::GET,
            "/dashboard/stats",
            RequestBody::Empty,
            &[],
        )
        .await
    }

    fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

/// Trend list wrapper so the generic call path can produce a `Vec`
struct TrendList(Vec<HealthTrend>);

impl TryFrom<TrendsResponseWire> for TrendList {
    type Error = String;

    fn try_from(wire: TrendsResponseWire) -> std::result::Result<Self, Self::Error> {
        wire.into_trends().map(TrendList)
    }
}

/// Dashboard statistics decode straight into the domain type; an empty body
/// yields the defaults
#[derive(serde::Deserialize)]
#[serde(transparent)]
struct DashboardWire(Value);

impl TryFrom<DashboardWire> for DashboardStats {
    type Error = String;

    fn try_from(wire: DashboardWire) -> std::result::Result<Self, Self::Error> {
        match wire.0 {
            Value::Null => Ok(DashboardStats::default()),
            value => serde_json::from_value(value).map_err(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn gateway() -> HttpGateway {
        HttpGateway::from_config(&MediClearConfig::default()).unwrap()
    }

    fn upload(content_type: &str, size: usize) -> RecordUpload {
        RecordUpload::builder()
            .file_name("scan.bin")
            .content_type(content_type)
            .bytes(vec![0u8; size])
            .record_type("blood_test")
            .report_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .lab_name("City Lab")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_oversized_upload_fails_before_network() {
        // Default base URL points at localhost:8000; nothing needs to listen
        let err = gateway()
            .upload_record(upload("application/pdf", 11 * 1024 * 1024))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            MediClearError::Validation("File size exceeds maximum limit of 10MB.".into())
        );
    }

    #[tokio::test]
    async fn test_wrong_type_upload_fails_before_network() {
        let err = gateway()
            .upload_record(upload("text/plain", 10))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_dashboard_null_body_defaults() {
        let stats = DashboardStats::try_from(DashboardWire(Value::Null)).unwrap();
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_base_url_exposed() {
        assert_eq!(gateway().base_url(), "http://localhost:8000/api/v1");
    }
}
