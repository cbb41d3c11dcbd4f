use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a PDF backend.
///
/// These never leave the extractor: `PdfTextExtractor` folds every variant
/// into empty text or an empty page list.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no PDF backend available")]
    BackendUnavailable,

    #[error("failed to open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error("failed to extract text from page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error("failed to collect page images: {0}")]
    Images(String),

    #[error("backend panicked while reading the document")]
    Panicked,
}

/// Errors surfaced to callers of `AgreementValidator::validate`
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("missing required {0} document path")]
    MissingInput(&'static str),
}
