//! lopdf backend
//!
//! Pure Rust: parses the PDF object tree directly, decodes each page's
//! content stream to text and collects embedded image XObjects. No page
//! rasterization happens here; a page image is the still-encoded stream of
//! an image placed on that page.

use super::{PdfBackend, RawExtraction};
use crate::error::ExtractError;
use crate::types::PageImage;
use ::lopdf::{Document, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn extract(&self, path: &Path) -> Result<RawExtraction, ExtractError> {
        let doc = Document::load(path).map_err(|e| ExtractError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let page_ids = doc.get_pages();
        tracing::trace!(path = %path.display(), pages = page_ids.len(), "opened PDF");

        let pages = page_ids
            .keys()
            .map(|&page| {
                doc.extract_text(&[page]).map_err(|e| ExtractError::Page {
                    page,
                    reason: e.to_string(),
                })
            })
            .collect();

        Ok(RawExtraction {
            pages,
            images: collect_images(&doc, &page_ids),
        })
    }

    fn name(&self) -> &str {
        "lopdf"
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn collect_images(
    doc: &Document,
    page_ids: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<PageImage>, ExtractError> {
    let mut images = Vec::new();
    for (&page, &page_id) in page_ids {
        let found = doc
            .get_page_images(page_id)
            .map_err(|e| ExtractError::Images(e.to_string()))?;
        images.extend(found.into_iter().map(|image| PageImage {
            page,
            width: image.width,
            height: image.height,
            data: image.content.to_vec(),
        }));
    }
    Ok(images)
}

/// Writes small single-font PDFs, one text line per page
#[cfg(test)]
pub(crate) mod test_support {
    use ::lopdf::content::{Content, Operation};
    use ::lopdf::{Dictionary, Document, Object, Stream, StringFormat};
    use std::path::Path;

    pub(crate) fn write_pdf(path: &Path, page_texts: &[&str]) {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(b"Courier".to_vec())),
        ]));
        let fonts = Dictionary::from_iter(vec![("F1", Object::Reference(font_id))]);
        let resources_id = doc.add_object(Dictionary::from_iter(vec![("Font", Object::Dictionary(fonts))]));

        let mut kids = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                    Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
            let page_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Reference(resources_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
            ]));
            kids.push(Object::Reference(page_id));
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(kids.len() as i64)),
            ("Kids", Object::Array(kids)),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.save(path).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_text_per_page() {
        let path = std::env::temp_dir().join("clausecheck_lopdf_two_pages.pdf");
        test_support::write_pdf(&path, &["PAN ABCDE1234F Rate Card", "Second page"]);

        let raw = LopdfBackend::new().extract(&path).unwrap();
        let texts: Vec<String> = raw
            .pages
            .into_iter()
            .map(|page| page.unwrap().trim().to_string())
            .collect();
        assert_eq!(texts, vec!["PAN ABCDE1234F Rate Card", "Second page"]);
        // No image XObjects on these pages
        assert!(raw.images.unwrap().is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_non_pdf_fails_to_open() {
        let path = std::env::temp_dir().join("clausecheck_lopdf_not_a_pdf.pdf");
        std::fs::write(&path, b"plain text pretending to be a PDF").unwrap();

        let result = LopdfBackend::new().extract(&path);
        assert!(matches!(result, Err(ExtractError::Open { .. })));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_fails_to_open() {
        let path = std::env::temp_dir().join("clausecheck_lopdf_missing.pdf");
        assert!(LopdfBackend::new().extract(&path).is_err());
    }
}
