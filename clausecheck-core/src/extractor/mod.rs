//! Text Extraction
//!
//! Turns a document path into an `ExtractedDocument` through a pluggable
//! backend.
//!
//! ## Architecture
//!
//! ```text
//! Document path
//!     ↓
//! [PdfBackend]          (lopdf, or the null backend)
//!     ↓
//! RawExtraction         (per-page Result<String>, Result<images>)
//!     ↓
//! [PdfTextExtractor]    folds every failure into empty values
//!     ↓
//! ExtractedDocument
//! ```
//!
//! The extractor never returns an error. A missing backend, an unreadable
//! file, a failing page or failing image collection all degrade to empty
//! text or an empty page list, so validation still runs.

pub mod backends;

pub use backends::{NullBackend, PdfBackend, PdfBackendImpl, RawExtraction};

#[cfg(feature = "lopdf-backend")]
pub use backends::LopdfBackend;

use crate::error::ExtractError;
use crate::types::ExtractedDocument;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Separator placed between page texts
pub const PAGE_SEPARATOR: &str = "\n\n";

/// PDF text extractor with pluggable backend
pub struct PdfTextExtractor {
    backend: Box<dyn PdfBackend>,
}

impl PdfTextExtractor {
    /// Extractor over the best backend compiled into this build
    pub fn new() -> Self {
        Self::with_backend(PdfBackendImpl::detect())
    }

    /// Extractor that always yields empty documents
    pub fn null() -> Self {
        Self::with_backend(NullBackend)
    }

    pub fn with_backend(backend: impl PdfBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Get the backend name for logging
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Extract text and page images; never fails.
    ///
    /// A backend that panics on a malformed file is treated like one that
    /// returned an error.
    pub fn extract(&self, path: &Path) -> ExtractedDocument {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.backend.extract(path)))
            .unwrap_or_else(|_| Err(ExtractError::Panicked));
        degrade(self.backend.name(), path, result)
    }

    pub fn supports_file_type(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// The one place backend failures become empty values
fn degrade(
    backend: &str,
    path: &Path,
    result: Result<RawExtraction, ExtractError>,
) -> ExtractedDocument {
    let raw = match result {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!(backend, path = %path.display(), error = %e, "extraction degraded to empty text");
            return ExtractedDocument::empty();
        }
    };

    let page_texts: Vec<String> = raw
        .pages
        .into_iter()
        .map(|page| {
            page.unwrap_or_else(|e| {
                tracing::debug!(backend, path = %path.display(), error = %e, "page degraded to empty text");
                String::new()
            })
        })
        .collect();

    let pages = raw.images.unwrap_or_else(|e| {
        tracing::debug!(backend, path = %path.display(), error = %e, "page images dropped");
        Vec::new()
    });

    ExtractedDocument {
        text: page_texts.join(PAGE_SEPARATOR),
        pages,
    }
}
