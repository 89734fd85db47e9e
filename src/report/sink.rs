// src/report/sink.rs
// =============================================================================
// Append-only tabular output for the report.
//
// The assembler only needs two operations: append a row of text fields and
// append a blank separator row. CsvReportSink writes those to any io::Write
// (a file in the binary, a Vec<u8> in tests).
// =============================================================================

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub trait ReportSink {
    type Error;

    fn append_row(&mut self, fields: &[String]) -> Result<(), Self::Error>;
    fn append_blank(&mut self) -> Result<(), Self::Error>;
}

/// Rows are CSV-encoded one at a time and copied to `inner`, so blank
/// separators can go straight to the output as a bare newline.
pub struct CsvReportSink<W: Write> {
    inner: W,
}

impl CsvReportSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, csv::Error> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CsvReportSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn finish(mut self) -> Result<W, csv::Error> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> ReportSink for CsvReportSink<W> {
    type Error = csv::Error;

    fn append_row(&mut self, fields: &[String]) -> Result<(), csv::Error> {
        let mut row = csv::Writer::from_writer(Vec::new());
        row.write_record(fields)?;
        let bytes = row
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        self.inner.write_all(&bytes)?;
        Ok(())
    }

    fn append_blank(&mut self) -> Result<(), csv::Error> {
        // csv would write an empty record as `""`.
        self.inner.write_all(b"\n")?;
        Ok(())
    }
}
