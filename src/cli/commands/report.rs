//! Report command implementation
//!
//! Shows one record together with its plain-language explanation and test
//! trends. Only the record itself is required; missing explanation or trend
//! data is shown as an empty section.

use super::{connect_or_report, print_json, print_list, report_failure, GlobalOptions};
use crate::core::report::{AggregatedReportView, ReportAggregator};
use crate::domain::{RecordId, ReportExplanation};
use clap::Args;

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Record identifier
    pub record_id: RecordId,

    /// Only show the trend of this test
    #[arg(long)]
    pub test: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(&self, options: &GlobalOptions) -> anyhow::Result<i32> {
        let gateway = match connect_or_report(options) {
            Ok(gateway) => gateway,
            Err(code) => return Ok(code),
        };

        let view = match ReportAggregator::new(gateway)
            .load_report(&self.record_id)
            .await
        {
            Ok(view) => view,
            Err(e) => return Ok(report_failure(&e)),
        };

        if self.json {
            print_json(&view)?;
        } else {
            self.print_view(&view);
        }
        Ok(0)
    }

    fn print_view(&self, view: &AggregatedReportView) {
        let record = &view.record;
        println!("📄 {} - {}", record.record_type, record.report_date);
        println!("   Lab: {}", record.lab_name);
        println!("   Status: {}", record.overall_status());
        println!();

        if !record.parsed_data.is_empty() {
            println!("Results:");
            for (name, result) in &record.parsed_data {
                let range = result
                    .normal_range
                    .map(|r| format!(" [{} - {}]", r.low, r.high))
                    .unwrap_or_default();
                println!(
                    "  {name}: {} {}{range} ({})",
                    result.value, result.unit, result.status
                );
            }
            println!();
        }

        match &view.explanation {
            Some(explanation) => print_explanation(explanation),
            None => println!("No explanation available for this report."),
        }
        println!();

        let trends: Vec<_> = match &self.test {
            Some(test) => view.trend_for(test).into_iter().collect(),
            None => view.trends.iter().collect(),
        };
        if trends.is_empty() {
            println!("{}", crate::core::report::NO_TRENDS_MESSAGE);
            return;
        }
        println!("Trends:");
        for trend in trends {
            let latest = trend
                .latest()
                .map(|point| format!(", latest {} on {}", point.value, point.date))
                .unwrap_or_default();
            println!(
                "  {}: {} (velocity {:+.2}{latest})",
                trend.test_name, trend.trend_direction, trend.velocity
            );
            if let Some(forecast) = &trend.forecast {
                println!("    Forecast: {forecast}");
            }
        }
    }
}

fn print_explanation(explanation: &ReportExplanation) {
    println!(
        "Summary (health score {}/100, risk {}):",
        explanation.overall_health_score, explanation.risk_level
    );
    println!("  {}", explanation.simple_summary);

    if !explanation.key_findings.is_empty() {
        println!("Key findings:");
        for finding in &explanation.key_findings {
            if finding.test_name.is_empty() {
                println!("  • {}", finding.meaning);
            } else {
                println!(
                    "  • {}: {} (normal {}) {}",
                    finding.test_name, finding.your_value, finding.normal_range, finding.meaning
                );
            }
        }
    }
    print_list("Good news", &explanation.positive_findings);
    print_list("Concerns", &explanation.concerns);
    print_list("Next steps", &explanation.next_steps);
}
