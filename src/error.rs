// src/error.rs
// =============================================================================
// Typed errors for the two failure families the engine distinguishes:
//
// - FetchError: a single page could not be fetched. The crawler records it
//   and abandons only that branch.
// - ManifestError: the manifest could not be loaded. Fatal, raised before the
//   crawl starts.
//
// Configuration problems (bad site root, bad proxy) are reported through
// anyhow in main.rs; missing CLI inputs are handled by clap itself.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// A page fetch that failed, with the HTTP status when one was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            message: format!("HTTP {}", status),
        }
    }

    // Turns a reqwest failure into a readable message, the same buckets the
    // old link checker used: timeout, redirect loop, DNS/connect, TLS, other.
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let error_string = error.to_string();

        let message = if error.is_timeout() {
            "Request timed out".to_string()
        } else if error.is_redirect() {
            "Too many redirects".to_string()
        } else if error.is_connect() {
            if error_string.contains("dns") {
                "Could not resolve hostname".to_string()
            } else {
                "Connection failed".to_string()
            }
        } else if error_string.contains("certificate") || error_string.contains("ssl") {
            "SSL certificate error".to_string()
        } else {
            error_string
        };

        Self {
            status: error.status().map(|s| s.as_u16()),
            message,
        }
    }
}

/// Failures while loading the expected-asset manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest sheet {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("manifest has no sheet {index} (found {available})")]
    MissingSheet { index: usize, available: usize },

    #[error("manifest sheet {sheet} is missing the '{column}' column")]
    MissingColumn { sheet: usize, column: String },

    #[error("manifest sheet {sheet}, row {row}: '{value}' is not a valid {column} width")]
    InvalidWidth {
        sheet: usize,
        row: usize,
        column: String,
        value: String,
    },
}
