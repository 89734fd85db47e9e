// src/manifest/mod.rs
// =============================================================================
// The expected-asset manifest and the reconciliation against crawl results.
//
// Submodules:
// - source: ManifestSource seam and the CSV workbook implementation
// - reconcile: ManifestEntry loading and the Matched/SizeMismatch/Missing rules
// =============================================================================

mod reconcile;
mod source;

pub use reconcile::{load, reconcile, ComparisonResult, ExpectedWidths, ManifestEntry, SizeMismatch};
pub use source::{CsvWorkbook, ManifestRow, ManifestSource, Sheet};
