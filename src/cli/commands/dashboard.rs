//! Dashboard command implementation

use super::{connect_or_report, print_json, report_failure, GlobalOptions};
use crate::domain::DashboardStats;
use clap::Args;

/// Arguments for the dashboard command
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

impl DashboardArgs {
    /// Execute the dashboard command
    pub async fn execute(&self, options: &GlobalOptions) -> anyhow::Result<i32> {
        let gateway = match connect_or_report(options) {
            Ok(gateway) => gateway,
            Err(code) => return Ok(code),
        };

        match gateway.dashboard_stats().await {
            Ok(stats) if self.json => {
                print_json(&stats)?;
                Ok(0)
            }
            Ok(stats) => {
                print_stats(&stats);
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}

fn print_stats(stats: &DashboardStats) {
    println!("📊 Dashboard");
    println!();
    println!("  Records:       {}", stats.total_records);
    println!("  Explanations:  {}", stats.total_explanations);
    println!("  Chat sessions: {}", stats.total_chat_sessions);
    if let Some(score) = stats.average_health_score {
        println!("  Avg. health score: {score:.1}");
    }

    if !stats.records_by_status.is_empty() {
        println!();
        println!("  Records by status:");
        for (status, count) in &stats.records_by_status {
            println!("    {status}: {count}");
        }
    }
}
