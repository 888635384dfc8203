//! Records command implementation

use super::{connect_or_report, print_json, report_failure, GlobalOptions};
use crate::domain::{RecordPage, RecordQuery};
use clap::Args;

/// Arguments for the records command
#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// Maximum number of records to list
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Number of records to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Only list records of this type
    #[arg(short = 't', long)]
    pub record_type: Option<String>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

impl RecordsArgs {
    fn query(&self) -> RecordQuery {
        RecordQuery {
            limit: self.limit,
            offset: self.offset,
            record_type: self.record_type.clone(),
        }
    }

    /// Execute the records command
    pub async fn execute(&self, options: &GlobalOptions) -> anyhow::Result<i32> {
        let gateway = match connect_or_report(options) {
            Ok(gateway) => gateway,
            Err(code) => return Ok(code),
        };

        match gateway.list_records(&self.query()).await {
            Ok(page) if self.json => {
                print_json(&page)?;
                Ok(0)
            }
            Ok(page) => {
                print_page(&page, self.offset);
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}

fn print_page(page: &RecordPage, offset: u32) {
    if page.records.is_empty() {
        println!("No records found.");
        return;
    }

    println!(
        "Showing {}-{} of {} records",
        u64::from(offset) + 1,
        u64::from(offset) + page.records.len() as u64,
        page.total
    );
    println!();
    for record in &page.records {
        println!(
            "  {}  {}  {:<14} {:<20} {}",
            record.id, record.report_date, record.record_type, record.lab_name, record.status
        );
    }
}
