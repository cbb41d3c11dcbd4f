// Clausecheck Core Library
//
// Compares a main agreement against a client agreement: tax identifiers,
// required keyword sections, a character diff and clause similarity.
// Text extraction sits behind a pluggable backend.

pub mod types;
pub mod error;
pub mod config;
pub mod extractor;
pub mod scanner;
pub mod diff;
pub mod similarity;
pub mod validator;
pub mod report;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{ExtractError, ValidationError};
pub use config::ValidatorConfig;
pub use extractor::{NullBackend, PdfBackend, PdfBackendImpl, PdfTextExtractor, RawExtraction};
pub use scanner::{find_identifiers, find_keywords, PatternScanner};
pub use diff::{diff, SequenceMatcher};
pub use similarity::{best_matches, score};
pub use validator::{AgreementValidator, StepProfiler};

// Re-export backends for direct use
#[cfg(feature = "lopdf-backend")]
pub use extractor::LopdfBackend;
