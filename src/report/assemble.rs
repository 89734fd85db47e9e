// src/report/assemble.rs
// =============================================================================
// Shapes reconciliation results and crawl errors into the final report, and
// writes that report row by row to a ReportSink.
//
// Layout (per mode that ran):
//
//   Graphics
//   Failures
//   Job,Filename,PID,Outcome,Details,Source
//   ...missing and size-mismatch rows...
//   <blank>
//   Successes
//   Job,Filename,PID,Outcome,Details,Source
//   ...matched rows...
//   <blank>
//
// followed by an Errors block only when the crawl hit fetch failures.
// =============================================================================

use serde::Serialize;

use super::sink::ReportSink;
use crate::assets::AssetKind;
use crate::crawl::CrawlError;
use crate::manifest::ComparisonResult;

const RESULT_COLUMNS: [&str; 6] = ["Job", "Filename", "PID", "Outcome", "Details", "Source"];
const ERROR_COLUMNS: [&str; 2] = ["Message", "URL"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub kind: AssetKind,
    pub failures: Vec<ComparisonResult>,
    pub successes: Vec<ComparisonResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
    pub errors: Vec<CrawlError>,
}

impl Report {
    pub fn failure_count(&self) -> usize {
        self.sections.iter().map(|s| s.failures.len()).sum()
    }

    pub fn success_count(&self) -> usize {
        self.sections.iter().map(|s| s.successes.len()).sum()
    }
}

/// Groups each mode's results into failures and successes, keeping order.
pub fn assemble(runs: Vec<(AssetKind, Vec<ComparisonResult>)>, errors: &[CrawlError]) -> Report {
    let sections = runs
        .into_iter()
        .map(|(kind, results)| {
            let (successes, failures): (Vec<_>, Vec<_>) =
                results.into_iter().partition(|r| r.is_success());
            ReportSection {
                kind,
                failures,
                successes,
            }
        })
        .collect();

    Report {
        sections,
        errors: errors.to_vec(),
    }
}

pub fn write_report<S: ReportSink>(report: &Report, sink: &mut S) -> Result<(), S::Error> {
    for section in &report.sections {
        sink.append_row(&[section.kind.to_string()])?;
        write_block(sink, "Failures", &section.failures)?;
        write_block(sink, "Successes", &section.successes)?;
    }

    if !report.errors.is_empty() {
        sink.append_row(&["Errors".to_string()])?;
        sink.append_row(&owned(&ERROR_COLUMNS))?;
        for error in &report.errors {
            sink.append_row(&[error.message.clone(), error.url.to_string()])?;
        }
    }

    Ok(())
}

fn write_block<S: ReportSink>(
    sink: &mut S,
    title: &str,
    results: &[ComparisonResult],
) -> Result<(), S::Error> {
    sink.append_row(&[title.to_string()])?;
    sink.append_row(&owned(&RESULT_COLUMNS))?;
    for result in results {
        sink.append_row(&result_row(result))?;
    }
    sink.append_blank()
}

fn result_row(result: &ComparisonResult) -> Vec<String> {
    let entry = result.entry();
    let (outcome, details, source) = match result {
        ComparisonResult::Matched { source_url, .. } => {
            ("Matched".to_string(), String::new(), source_url.to_string())
        }
        ComparisonResult::SizeMismatch {
            source_url,
            mismatches,
            ..
        } => {
            let details = mismatches
                .iter()
                .map(|m| format!("{}: {} (expected {})", m.size_class, m.actual, m.expected))
                .collect::<Vec<_>>()
                .join("; ");
            ("Size mismatch".to_string(), details, source_url.to_string())
        }
        ComparisonResult::Missing { .. } => ("Missing".to_string(), String::new(), String::new()),
    };

    vec![
        entry.job.clone(),
        entry.filename.clone(),
        entry.pid.clone(),
        outcome,
        details,
        source,
    ]
}

fn owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}
