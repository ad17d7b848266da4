use std::path::PathBuf;

use thiserror::Error;

/// Every failure the analysis pipeline can report.
///
/// Column mismatches are *not* errors: they are printed as warnings and the
/// affected visualization is skipped.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open archive {path}: {source}")]
    OpenArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ZIP archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("CSV error in '{entry}': {source}")]
    Csv {
        entry: String,
        #[source]
        source: csv::Error,
    },

    #[error("'{entry}' is not valid UTF-8")]
    Encoding { entry: String },

    #[error("'{entry}' has no header row")]
    MissingHeader { entry: String },

    #[error("'{entry}' line {line}: expected at most {expected} fields, got {found}")]
    RaggedRow {
        entry: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("'{entry}': header row is missing expected column(s) {missing:?}")]
    UnexpectedHeader { entry: String, missing: Vec<String> },

    #[error("archive contains no CSV entries")]
    EmptyDataset,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to export charts: {0}")]
    Export(#[from] serde_json::Error),
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
