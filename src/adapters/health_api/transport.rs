//! Shared HTTP calling convention and error normalization
//!
//! Every gateway operation goes through [`TransportClient::send`] and maps its
//! failures with [`normalize`]. Nothing else in the crate looks at a raw
//! [`TransportError`].

use crate::config::ApiConfig;
use crate::domain::{MediClearError, Result, TransportError};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, ClientBuilder, Method};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::config::SecretString;

/// Header carrying a per-request correlation id
const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Fallback used when a failure carries no message at all
const UNKNOWN_ERROR: &str = "Unknown error";

/// Gateway operations, each with its fixed failure prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AnalyzeSymptoms,
    UploadRecord,
    ListRecords,
    GetRecordDetails,
    ExplainReport,
    GetHealthTrends,
    AskQuestion,
    GetChatHistory,
    DashboardStats,
}

impl Operation {
    /// Prefix of the generic message used when the server sent no `detail`
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Operation::AnalyzeSymptoms => "Failed to analyze symptoms",
            Operation::UploadRecord => "Failed to upload record",
            Operation::ListRecords => "Failed to fetch records",
            Operation::GetRecordDetails => "Failed to fetch record details",
            Operation::ExplainReport => "Failed to explain report",
            Operation::GetHealthTrends => "Failed to fetch health trends",
            Operation::AskQuestion => "Failed to get answer",
            Operation::GetChatHistory => "Failed to fetch chat history",
            Operation::DashboardStats => "Failed to fetch dashboard stats",
        }
    }

    /// Short name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AnalyzeSymptoms => "analyze_symptoms",
            Operation::UploadRecord => "upload_record",
            Operation::ListRecords => "list_records",
            Operation::GetRecordDetails => "get_record_details",
            Operation::ExplainReport => "explain_report",
            Operation::GetHealthTrends => "get_health_trends",
            Operation::AskQuestion => "ask_question",
            Operation::GetChatHistory => "get_chat_history",
            Operation::DashboardStats => "dashboard_stats",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a raw transport failure onto the error contract
///
/// A `detail` field in the server payload wins and is surfaced as is, after
/// JSON-stringifying it when it is not a string. A `null` or empty detail
/// counts as absent. Otherwise the message is the operation prefix followed by
/// the lower-level message, or "Unknown error" when there is none.
pub fn normalize(operation: Operation, error: TransportError) -> MediClearError {
    if let Some(detail) = error.payload().and_then(|payload| payload.get("detail")) {
        let message = match detail {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(serde_json::to_string(other).unwrap_or_else(|_| other.to_string())),
        };
        if let Some(message) = message {
            return MediClearError::Server(message);
        }
    }

    let message = error
        .message()
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    MediClearError::Transport(format!("{}: {}", operation.failure_prefix(), message))
}

/// Request body variants the API accepts
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(Value),
    /// `multipart/form-data` upload
    Multipart(Form),
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Json(value) => f.debug_tuple("Json").field(value).finish(),
            RequestBody::Multipart(_) => f.write_str("Multipart"),
        }
    }
}

/// HTTP client bound to one API base URL
///
/// Holds a single connection pool; cheap to share behind an `Arc`.
pub struct TransportClient {
    client: Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl TransportClient {
    /// Builds a client from API configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL does not parse or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            MediClearError::Configuration(format!(
                "Invalid API base URL '{}': {e}",
                config.base_url
            ))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| {
                MediClearError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Performs one request and returns the decoded JSON body
    ///
    /// An empty success body decodes to `Value::Null`. A non-success status
    /// yields [`TransportError::Status`] with the body attached when it parses
    /// as JSON.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        query: &[(&str, String)],
    ) -> std::result::Result<Value, TransportError> {
        let url = self.url(path);
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, &request_id);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = &self.api_token {
            request = request.header(
                AUTHORIZATION,
                format!("Bearer {}", token.expose_secret().as_ref()),
            );
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        tracing::debug!(method = %method, path, request_id = %request_id, "Sending API request");

        let no_payload: Option<Value> = None;
        let response = request.send().await.map_err(|e| {
            crate::log_request_failure!(method, path, None::<u16>, no_payload);
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            crate::log_request_failure!(method, path, Some(status.as_u16()), no_payload);
            TransportError::Network(e.to_string())
        })?;

        if !status.is_success() {
            let payload: Option<Value> = serde_json::from_slice(&bytes).ok();
            crate::log_request_failure!(method, path, Some(status.as_u16()), payload);
            return Err(TransportError::Status {
                status: status.as_u16(),
                payload,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            crate::log_request_failure!(method, path, Some(status.as_u16()), no_payload);
            TransportError::InvalidResponse(e.to_string())
        })
    }
}

/// Decodes a JSON body into a wire type
pub fn decode<T: DeserializeOwned>(value: Value) -> std::result::Result<T, TransportError> {
    serde_json::from_value(value).map_err(|e| TransportError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_error(payload: Option<Value>) -> TransportError {
        TransportError::Status {
            status: 422,
            payload,
        }
    }

    #[test]
    fn test_string_detail_is_surfaced_verbatim() {
        let err = normalize(
            Operation::AnalyzeSymptoms,
            status_error(Some(json!({"detail": "Age must be at most 120"}))),
        );
        assert_eq!(err, MediClearError::Server("Age must be at most 120".into()));
    }

    #[test]
    fn test_structured_detail_is_stringified() {
        let detail = json!([{"loc": ["body", "age"], "msg": "too large"}]);
        let err = normalize(
            Operation::AnalyzeSymptoms,
            status_error(Some(json!({ "detail": detail.clone() }))),
        );
        assert_eq!(err, MediClearError::Server(detail.to_string()));
    }

    #[test]
    fn test_missing_detail_uses_prefix_and_message() {
        let err = normalize(
            Operation::ListRecords,
            status_error(Some(json!({"error": "boom"}))),
        );
        assert_eq!(
            err.to_string(),
            "Failed to fetch records: Request failed with status code 422"
        );
    }

    #[test]
    fn test_null_detail_counts_as_absent() {
        let err = normalize(Operation::ExplainReport, status_error(Some(json!({"detail": null}))));
        assert!(matches!(err, MediClearError::Transport(_)));
    }

    #[test]
    fn test_whitespace_detail_counts_as_absent() {
        let err = normalize(
            Operation::GetRecordDetails,
            status_error(Some(json!({"detail": "  \n "}))),
        );
        assert_eq!(
            err.to_string(),
            "Failed to fetch record details: Request failed with status code 422"
        );
    }

    #[test]
    fn test_network_failure_without_message() {
        let err = normalize(Operation::AskQuestion, TransportError::Network(String::new()));
        assert_eq!(err.to_string(), "Failed to get answer: Unknown error");
    }

    #[test]
    fn test_network_failure_with_message() {
        let err = normalize(
            Operation::UploadRecord,
            TransportError::Network("connection refused".into()),
        );
        assert_eq!(err.to_string(), "Failed to upload record: connection refused");
    }

    #[test]
    fn test_invalid_response_is_prefixed() {
        let err = normalize(
            Operation::GetHealthTrends,
            TransportError::InvalidResponse("missing field `test_trends`".into()),
        );
        assert!(err
            .to_string()
            .starts_with("Failed to fetch health trends: Invalid response from server"));
    }

    #[test]
    fn test_every_operation_has_a_prefix() {
        let ops = [
            Operation::AnalyzeSymptoms,
            Operation::UploadRecord,
            Operation::ListRecords,
            Operation::GetRecordDetails,
            Operation::ExplainReport,
            Operation::GetHealthTrends,
            Operation::AskQuestion,
            Operation::GetChatHistory,
            Operation::DashboardStats,
        ];
        for op in ops {
            assert!(op.failure_prefix().starts_with("Failed to "));
        }
    }

    #[test]
    fn test_url_joining() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/api/v1/".into(),
            ..Default::default()
        };
        let client = TransportClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url("/records"), "http://localhost:8000/api/v1/records");
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let config = ApiConfig {
            base_url: "::not a url".into(),
            ..Default::default()
        };
        assert!(matches!(
            TransportClient::new(&config),
            Err(MediClearError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_port_is_network_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9/api/v1".into(),
            connect_timeout_seconds: 2,
            timeout_seconds: 2,
            ..Default::default()
        };
        let client = TransportClient::new(&config).unwrap();

        let err = client
            .send(Method::GET, "records", RequestBody::Empty, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));

        let normalized = normalize(Operation::ListRecords, err);
        assert!(matches!(normalized, MediClearError::Transport(_)));
        assert!(normalized.to_string().starts_with("Failed to fetch records: "));
    }
}
