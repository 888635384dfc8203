//! Upload command implementation

use super::{connect_or_report, print_json, report_failure, GlobalOptions};
use crate::domain::{MediClearError, RecordUpload};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the upload command
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// PDF, JPG or PNG file to upload
    pub file: PathBuf,

    /// Kind of record, e.g. blood_test
    #[arg(short = 't', long, default_value = "blood_test")]
    pub record_type: String,

    /// Date of the report (YYYY-MM-DD)
    #[arg(short = 'd', long)]
    pub report_date: NaiveDate,

    /// Laboratory that produced the report
    #[arg(long)]
    pub lab_name: String,

    /// Optional notes stored with the record
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Print the receipt as JSON
    #[arg(long)]
    pub json: bool,
}

impl UploadArgs {
    async fn build_upload(&self) -> Result<RecordUpload, MediClearError> {
        RecordUpload::builder()
            .file_from_path(&self.file)
            .await?
            .record_type(self.record_type.as_str())
            .report_date(self.report_date)
            .lab_name(self.lab_name.as_str())
            .notes(self.notes.clone())
            .build()
            .map_err(MediClearError::Validation)
    }

    /// Execute the upload command
    pub async fn execute(&self, options: &GlobalOptions) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Uploading record");

        let upload = match self.build_upload().await {
            Ok(upload) => upload,
            Err(e) => return Ok(report_failure(&e)),
        };

        let gateway = match connect_or_report(options) {
            Ok(gateway) => gateway,
            Err(code) => return Ok(code),
        };

        println!(
            "📤 Uploading {} ({} bytes)...",
            upload.file_name,
            upload.size_bytes()
        );
        match gateway.upload_record(upload).await {
            Ok(receipt) => {
                if self.json {
                    print_json(&receipt)?;
                    return Ok(0);
                }
                println!("✅ {}", receipt.message);
                println!("   Record ID: {}", receipt.record_id);
                println!("   Status: {}", receipt.initial_status);
                if !receipt.parsed_data.is_empty() {
                    println!("   Extracted values:");
                    for (name, result) in &receipt.parsed_data {
                        println!(
                            "     {name}: {} {} ({})",
                            result.value, result.unit, result.status
                        );
                    }
                }
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}
