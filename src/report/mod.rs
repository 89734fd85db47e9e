// src/report/mod.rs
// =============================================================================
// Turning reconciliation results into something an operator can read.
//
// Submodules:
// - assemble: Report/ReportSection and the row layout
// - sink: ReportSink seam and the CSV implementation
// =============================================================================

mod assemble;
mod sink;

pub use assemble::{assemble, write_report, Report, ReportSection};
pub use sink::{CsvReportSink, ReportSink};
