use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Maximum number of characters kept from an extra document's text.
pub const TEXT_SNIPPET_CHARS: usize = 1000;

// ===== EXTRACTION TYPES =====

/// Opaque image handle for one embedded page image.
///
/// Carried through extraction for callers that want it; nothing in the
/// comparison pipeline reads these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Page number (1-indexed)
    pub page: u32,
    pub width: i64,
    pub height: i64,
    /// Raw (still encoded) image stream bytes
    pub data: Vec<u8>,
}

/// Plain text and page images pulled out of a single document.
///
/// `text` is empty, never absent, when the backend is missing or fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub text: String,
    pub pages: Vec<PageImage>,
}

impl ExtractedDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Text with whitespace-only content collapsed to the empty string
    pub fn into_text(self) -> String {
        if self.text.trim().is_empty() {
            String::new()
        } else {
            self.text
        }
    }
}

/// A supporting document passed alongside the two agreements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraDocument {
    pub path: PathBuf,
    /// Display name; defaults to `document_{n}.pdf` when absent
    pub name: Option<String>,
}

impl ExtraDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }

    pub fn named(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
        }
    }

    /// Name used as the report key; `index` is 0-based
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("document_{}.pdf", index + 1),
        }
    }
}

// ===== SCAN & COMPARISON RESULTS =====

/// Identifiers and keywords found in one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub pan: Vec<String>,
    #[serde(default)]
    pub gst: Vec<String>,
    #[serde(default)]
    pub coi_keywords: Vec<String>,
    #[serde(default)]
    pub rate_keywords: Vec<String>,
}

/// Text spans inserted into / removed from the main document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Best client-line match for one main-document line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilaritySample {
    pub main: String,
    /// `None` when no client line scored above zero
    pub best_match: Option<String>,
    pub score: f64,
}

/// Scan results plus a text preview for a supporting document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    #[serde(flatten)]
    pub scan: ScanResult,
    #[serde(default)]
    pub text_snippet: String,
}

impl DocumentSummary {
    pub fn new(scan: ScanResult, text: &str) -> Self {
        Self {
            scan,
            text_snippet: text.chars().take(TEXT_SNIPPET_CHARS).collect(),
        }
    }
}

// ===== REPORT =====

/// One report field observed on both agreements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainClientPair<T> {
    pub main: T,
    pub client: T,
}

/// Insertion-ordered map from display name to document summary.
///
/// Inserting an existing name replaces the value in place, so the entry keeps
/// its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSummaries {
    entries: Vec<(String, DocumentSummary)>,
}

impl DocumentSummaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, summary: DocumentSummary) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = summary,
            None => self.entries.push((name, summary)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DocumentSummary> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, summary)| summary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentSummary)> {
        self.entries.iter().map(|(name, summary)| (name.as_str(), summary))
    }
}

impl Serialize for DocumentSummaries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, summary) in &self.entries {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DocumentSummaries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SummariesVisitor;

        impl<'de> Visitor<'de> for SummariesVisitor {
            type Value = DocumentSummaries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of document names to summaries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut summaries = DocumentSummaries::new();
                while let Some((name, summary)) = access.next_entry::<String, DocumentSummary>()? {
                    summaries.insert(name, summary);
                }
                Ok(summaries)
            }
        }

        deserializer.deserialize_map(SummariesVisitor)
    }
}

/// Result of comparing a main and client agreement plus supporting documents.
///
/// Field names and nesting are the wire contract for downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub pan: MainClientPair<Vec<String>>,
    pub gst: MainClientPair<Vec<String>>,
    pub coi_keywords: MainClientPair<Vec<String>>,
    pub rate_keywords: MainClientPair<Vec<String>>,
    pub diff: DiffResult,
    pub clause_similarity_samples: Vec<SimilaritySample>,
    pub documents: DocumentSummaries,
}

impl ValidationReport {
    pub fn new(
        main: ScanResult,
        client: ScanResult,
        diff: DiffResult,
        clause_similarity_samples: Vec<SimilaritySample>,
        documents: DocumentSummaries,
    ) -> Self {
        Self {
            pan: MainClientPair {
                main: main.pan,
                client: client.pan,
            },
            gst: MainClientPair {
                main: main.gst,
                client: client.gst,
            },
            coi_keywords: MainClientPair {
                main: main.coi_keywords,
                client: client.coi_keywords,
            },
            rate_keywords: MainClientPair {
                main: main.rate_keywords,
                client: client.rate_keywords,
            },
            diff,
            clause_similarity_samples,
            documents,
        }
    }

    /// Samples whose best score falls under `threshold`
    pub fn samples_below(&self, threshold: f64) -> Vec<&SimilaritySample> {
        self.clause_similarity_samples
            .iter()
            .filter(|sample| sample.score < threshold)
            .collect()
    }
}
