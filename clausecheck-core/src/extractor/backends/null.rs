use super::{PdfBackend, RawExtraction};
use crate::error::ExtractError;
use std::path::Path;

/// Backend selected when no PDF library is compiled in.
///
/// Every extraction reports `BackendUnavailable`, which the extractor turns
/// into empty text and no pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl PdfBackend for NullBackend {
    fn extract(&self, _path: &Path) -> Result<RawExtraction, ExtractError> {
        Err(ExtractError::BackendUnavailable)
    }

    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }
}
