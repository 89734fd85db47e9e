// src/manifest/source.rs
// =============================================================================
// Where manifest rows come from.
//
// The reconciler asks a ManifestSource for a numbered sheet and reads fields
// by column name. CsvWorkbook is the on-disk implementation:
//
// - a single .csv file is a one-sheet workbook (sheet 0)
// - a directory is a workbook whose sheets are its *.csv files, sorted by
//   file name (so `0-graphics.csv`, `1-photos.csv` land at 0 and 1)
//
// Column names are trimmed and lower-cased so "PID " and "pid" are the same
// column.
// =============================================================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;

/// One data row, keyed by normalized column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestRow {
    fields: HashMap<String, String>,
}

impl ManifestRow {
    pub fn from_pairs<K: AsRef<str>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (normalize_header(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// The trimmed value of `column`, or "" if the row doesn't have it.
    pub fn get(&self, column: &str) -> &str {
        self.fields
            .get(&normalize_header(column))
            .map(|v| v.trim())
            .unwrap_or("")
    }
}

/// A sheet: its normalized headers plus its data rows in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<ManifestRow>,
}

impl Sheet {
    pub fn has_column(&self, column: &str) -> bool {
        let column = normalize_header(column);
        self.headers.iter().any(|h| *h == column)
    }
}

pub trait ManifestSource {
    fn sheet(&self, index: usize) -> Result<Sheet, ManifestError>;
}

/// CSV-backed manifest: one file, or a directory of files.
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    sheets: Vec<PathBuf>,
}

impl CsvWorkbook {
    pub fn open(path: &Path) -> Result<Self, ManifestError> {
        let metadata = std::fs::metadata(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_dir() {
            return Ok(Self {
                sheets: vec![path.to_path_buf()],
            });
        }

        let entries = std::fs::read_dir(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sheets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ManifestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let sheet_path = entry.path();
            let is_csv = sheet_path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if is_csv && sheet_path.is_file() {
                sheets.push(sheet_path);
            }
        }
        sheets.sort();

        tracing::debug!(
            "Opened manifest workbook {} with {} sheet(s)",
            path.display(),
            sheets.len()
        );
        Ok(Self { sheets })
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

impl ManifestSource for CsvWorkbook {
    fn sheet(&self, index: usize) -> Result<Sheet, ManifestError> {
        let path = self.sheets.get(index).ok_or(ManifestError::MissingSheet {
            index,
            available: self.sheets.len(),
        })?;

        let csv_error = |source: csv::Error| ManifestError::Csv {
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(path)
            .map_err(csv_error)?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(normalize_header)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            rows.push(ManifestRow::from_pairs(
                headers.iter().zip(record.iter()).map(|(h, v)| (h, v.to_string())),
            ));
        }

        Ok(Sheet { headers, rows })
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}
