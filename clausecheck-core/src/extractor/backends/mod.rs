//! PDF Backend trait and backend enum
//!
//! Defines the interface every text/image extraction backend implements.
//! Backends report failures as `ExtractError`; deciding what a failure
//! degrades to is the extractor's job, not the backend's.

use crate::error::ExtractError;
use crate::types::PageImage;
use std::path::Path;

pub mod null;
pub use null::NullBackend;

#[cfg(feature = "lopdf-backend")]
pub mod lopdf;

#[cfg(feature = "lopdf-backend")]
pub use self::lopdf::LopdfBackend;

/// Everything a backend pulled from one opened document
#[derive(Debug)]
pub struct RawExtraction {
    /// One entry per page, in page order
    pub pages: Vec<Result<String, ExtractError>>,
    pub images: Result<Vec<PageImage>, ExtractError>,
}

/// Backend trait for PDF extraction
pub trait PdfBackend: Send + Sync {
    /// Open the document and extract per-page text and page images.
    ///
    /// Returns `Err` only when the document cannot be opened at all.
    fn extract(&self, path: &Path) -> Result<RawExtraction, ExtractError>;

    /// Backend identifier for logging/debugging
    fn name(&self) -> &str;

    /// Whether this backend can extract anything at all
    fn is_available(&self) -> bool;
}

/// Backend enum for runtime backend selection
pub enum PdfBackendImpl {
    #[cfg(feature = "lopdf-backend")]
    Lopdf(LopdfBackend),
    Null(NullBackend),
}

impl PdfBackendImpl {
    /// Best backend compiled into this build; the null backend otherwise
    pub fn detect() -> Self {
        #[cfg(feature = "lopdf-backend")]
        {
            PdfBackendImpl::Lopdf(LopdfBackend::new())
        }
        #[cfg(not(feature = "lopdf-backend"))]
        {
            PdfBackendImpl::Null(NullBackend)
        }
    }
}

impl PdfBackend for PdfBackendImpl {
    fn extract(&self, path: &Path) -> Result<RawExtraction, ExtractError> {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.extract(path),
            PdfBackendImpl::Null(backend) => backend.extract(path),
        }
    }

    fn name(&self) -> &str {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.name(),
            PdfBackendImpl::Null(backend) => backend.name(),
        }
    }

    fn is_available(&self) -> bool {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.is_available(),
            PdfBackendImpl::Null(backend) => backend.is_available(),
        }
    }
}
