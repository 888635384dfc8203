//! Medical record domain models
//!
//! Summaries, full record details, and the upload request with its local
//! pre-flight policy.

use super::errors::MediClearError;
use super::ids::RecordId;
use super::result::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// One mebibyte
const MIB: u64 = 1024 * 1024;

/// Largest configurable upload limit, in MiB
pub const MAX_UPLOAD_SIZE_MB: u64 = 1024;

/// Severity flag attached to a record or a single test value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordStatus {
    /// Within normal range
    Normal,
    /// Worth keeping an eye on
    Monitor,
    /// Needs attention
    Urgent,
    /// A status this client does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordStatus::Normal => "NORMAL",
            RecordStatus::Monitor => "MONITOR",
            RecordStatus::Urgent => "URGENT",
            RecordStatus::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Reference interval for a test value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalRange {
    /// Lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}

impl NormalRange {
    /// Whether `value` lies inside the interval (bounds inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// One parsed test value from an uploaded record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// Measured value
    pub value: f64,
    /// Unit of measurement
    pub unit: String,
    /// Reference interval, when the parser knew one
    pub normal_range: Option<NormalRange>,
    /// Status of this value
    pub status: RecordStatus,
}

/// Record summary as shown in record listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalRecord {
    /// Record identifier
    pub id: RecordId,
    /// Kind of record, e.g. "blood_test"
    pub record_type: String,
    /// Date printed on the report
    pub report_date: NaiveDate,
    /// Issuing laboratory
    pub lab_name: String,
    /// Overall record status
    pub status: RecordStatus,
    /// When the record was uploaded
    pub created_at: DateTime<Utc>,
}

/// Short analysis stored alongside a record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordAnalysis {
    /// Plain-language explanation
    pub simple_explanation: Option<String>,
    /// Overall health score (0..=100), if computed
    pub overall_health_score: Option<u8>,
    /// Risk level label, if computed
    pub risk_level: Option<String>,
}

/// Full record as shown on the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDetails {
    /// Record identifier
    pub id: RecordId,
    /// Kind of record
    pub record_type: String,
    /// Date printed on the report
    pub report_date: NaiveDate,
    /// Issuing laboratory
    pub lab_name: String,
    /// Overall status, when the server sent one
    pub status: Option<RecordStatus>,
    /// Upload time, when the server sent one
    pub created_at: Option<DateTime<Utc>>,
    /// Text extracted from the uploaded file
    pub extracted_text: String,
    /// Parsed test values keyed by test name
    pub parsed_data: BTreeMap<String, TestResult>,
    /// Stored analysis, if one was generated
    pub analysis: Option<RecordAnalysis>,
}

impl RecordDetails {
    /// Overall status of the record
    ///
    /// Uses the server's status when present, otherwise derives it from the
    /// parsed values: any urgent value makes the record urgent, then any value
    /// to monitor, else normal.
    pub fn overall_status(&self) -> RecordStatus {
        if let Some(status) = self.status {
            return status;
        }
        derive_overall_status(self.parsed_data.values())
    }

    /// Test values that are outside their reference interval
    pub fn out_of_range(&self) -> Vec<(&str, &TestResult)> {
        self.parsed_data
            .iter()
            .filter(|(_, result)| {
                result
                    .normal_range
                    .map(|range| !range.contains(result.value))
                    .unwrap_or(false)
            })
            .map(|(name, result)| (name.as_str(), result))
            .collect()
    }
}

/// Derives a record status from its test values
pub fn derive_overall_status<'a>(
    results: impl IntoIterator<Item = &'a TestResult>,
) -> RecordStatus {
    let mut overall = RecordStatus::Normal;
    for result in results {
        match result.status {
            RecordStatus::Urgent => return RecordStatus::Urgent,
            RecordStatus::Monitor => overall = RecordStatus::Monitor,
            _ => {}
        }
    }
    overall
}

/// One page of record summaries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordPage {
    /// Total number of records matching the query
    pub total: u64,
    /// Records on this page
    pub records: Vec<MedicalRecord>,
}

/// Pagination and filter parameters for record listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    /// Page size
    pub limit: u32,
    /// Number of records to skip
    pub offset: u32,
    /// Only return records of this type
    pub record_type: Option<String>,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            record_type: None,
        }
    }
}

impl RecordQuery {
    /// Query string pairs, omitting the type filter when unset
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(record_type) = self.record_type.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("record_type", record_type.to_string()));
        }
        pairs
    }
}

/// A file ready to be uploaded together with its form fields
#[derive(Clone, PartialEq)]
pub struct RecordUpload {
    /// Original file name
    pub file_name: String,
    /// MIME type of the file
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
    /// Kind of record
    pub record_type: String,
    /// Date printed on the report
    pub report_date: NaiveDate,
    /// Issuing laboratory
    pub lab_name: String,
    /// Optional free-text notes
    pub notes: Option<String>,
}

impl fmt::Debug for RecordUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.bytes.len())
            .field("record_type", &self.record_type)
            .field("report_date", &self.report_date)
            .field("lab_name", &self.lab_name)
            .field("notes", &self.notes)
            .finish()
    }
}

impl RecordUpload {
    /// Creates a new builder for constructing a RecordUpload
    pub fn builder() -> RecordUploadBuilder {
        RecordUploadBuilder::default()
    }

    /// Size of the file in bytes
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Builder for constructing RecordUpload instances
#[derive(Debug, Default)]
pub struct RecordUploadBuilder {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Option<Vec<u8>>,
    record_type: Option<String>,
    report_date: Option<NaiveDate>,
    lab_name: Option<String>,
    notes: Option<String>,
}

impl RecordUploadBuilder {
    /// Creates a new RecordUploadBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file name
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the MIME type
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the file contents
    pub fn bytes(mut self, bytes: Vec<u8>) -> Self {
        self.bytes = Some(bytes);
        self
    }

    /// Sets the record type
    pub fn record_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    /// Sets the report date
    pub fn report_date(mut self, report_date: NaiveDate) -> Self {
        self.report_date = Some(report_date);
        self
    }

    /// Sets the lab name
    pub fn lab_name(mut self, lab_name: impl Into<String>) -> Self {
        self.lab_name = Some(lab_name.into());
        self
    }

    /// Sets the optional notes; blank notes are dropped
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }

    /// Reads the file at `path`, taking its name and guessing its MIME type
    /// from the extension
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub async fn file_from_path(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            MediClearError::Io(format!("Failed to read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        self.file_name = Some(file_name);
        self.content_type = Some(content_type);
        self.bytes = Some(bytes);
        Ok(self)
    }

    /// Builds the RecordUpload
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is missing
    pub fn build(self) -> std::result::Result<RecordUpload, String> {
        Ok(RecordUpload {
            file_name: self.file_name.ok_or("file_name is required")?,
            content_type: self.content_type.ok_or("content_type is required")?,
            bytes: self.bytes.ok_or("file contents are required")?,
            record_type: self.record_type.ok_or("record_type is required")?,
            report_date: self.report_date.ok_or("report_date is required")?,
            lab_name: self.lab_name.ok_or("lab_name is required")?,
            notes: self.notes,
        })
    }
}

/// Client-side constraints checked before an upload leaves the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Largest accepted file, in bytes
    pub max_file_size_bytes: u64,
    /// Accepted MIME types
    pub allowed_content_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * MIB,
            allowed_content_types: vec![
                "application/pdf".to_string(),
                "image/jpeg".to_string(),
                "image/png".to_string(),
            ],
        }
    }
}

impl UploadPolicy {
    /// Builds a policy from a size limit in MiB and an allow-list
    pub fn new(max_file_size_mb: u64, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_file_size_bytes: max_file_size_mb.saturating_mul(MIB),
            allowed_content_types,
        }
    }

    /// Checks an upload against the policy
    ///
    /// # Errors
    ///
    /// Returns [`MediClearError::Validation`] describing the first violation.
    pub fn validate(&self, upload: &RecordUpload) -> Result<()> {
        if upload.size_bytes() > self.max_file_size_bytes {
            return Err(MediClearError::Validation(format!(
                "File size exceeds maximum limit of {}MB.",
                self.max_file_size_bytes / MIB
            )));
        }

        let content_type = upload.content_type.trim().to_lowercase();
        if !self
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&content_type))
        {
            return Err(MediClearError::Validation(
                "Invalid file type. Only PDF, JPG, and PNG are allowed.".to_string(),
            ));
        }

        if upload.record_type.trim().is_empty() {
            return Err(MediClearError::Validation(
                "Record type is required.".to_string(),
            ));
        }

        if upload.lab_name.trim().is_empty() {
            return Err(MediClearError::Validation("Lab name is required.".to_string()));
        }

        Ok(())
    }
}

/// Server acknowledgement of a processed upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReceipt {
    /// Identifier of the new record
    pub record_id: RecordId,
    /// Human-readable confirmation
    pub message: String,
    /// Status computed from the parsed values
    pub initial_status: RecordStatus,
    /// Text extracted from the file
    pub extracted_text: String,
    /// Parsed test values keyed by test name
    pub parsed_data: BTreeMap<String, TestResult>,
}
