use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PAN_REGEX: &str = r"\b([A-Z]{5}[0-9]{4}[A-Z])\b";
pub const DEFAULT_GST_REGEX: &str = r"\b[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]\b";
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;

// Default value functions for serde
fn default_pan_regex() -> String {
    DEFAULT_PAN_REGEX.to_string()
}

fn default_gst_regex() -> String {
    DEFAULT_GST_REGEX.to_string()
}

fn default_coi_keywords() -> Vec<String> {
    vec![
        "certificate of incorporation".to_string(),
        "incorporation certificate".to_string(),
    ]
}

fn default_ratecard_keywords() -> Vec<String> {
    vec![
        "rate card".to_string(),
        "rate-card".to_string(),
        "price list".to_string(),
    ]
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

/// Validator configuration.
///
/// Every key is optional in the YAML source; a missing key keeps its default,
/// a present key replaces it. `pan_regex: ~` deserializes to an empty string,
/// which the scanner treats as "use the default pattern".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Pattern for PAN identifiers (5 letters, 4 digits, 1 letter)
    #[serde(default = "default_pan_regex", deserialize_with = "nullable_string")]
    pub pan_regex: String,
    /// Pattern for GST registration numbers
    #[serde(default = "default_gst_regex", deserialize_with = "nullable_string")]
    pub gst_regex: String,
    /// Phrases indicating a certificate of incorporation
    #[serde(default = "default_coi_keywords")]
    pub coi_keywords: Vec<String>,
    /// Phrases indicating a rate card / price schedule
    #[serde(default = "default_ratecard_keywords")]
    pub ratecard_keywords: Vec<String>,
    /// Clause similarity below this is flagged (0.0-1.0)
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            pan_regex: default_pan_regex(),
            gst_regex: default_gst_regex(),
            coi_keywords: default_coi_keywords(),
            ratecard_keywords: default_ratecard_keywords(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl ValidatorConfig {
    /// Parse config from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ValidatorConfig = serde_yaml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Load config from file path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&Path>) -> Self {
        let Some(p) = path else {
            return Self::default();
        };
        if !p.exists() {
            tracing::debug!(path = %p.display(), "config file not found, using defaults");
            return Self::default();
        }
        Self::load_from_file(p).unwrap_or_else(|e| {
            tracing::warn!(path = %p.display(), error = %e, "failed to load config, using defaults");
            Self::default()
        })
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Keywords lower-cased, threshold clamped into [0, 1]
    pub fn normalized(mut self) -> Self {
        self.coi_keywords = lowercase_all(&self.coi_keywords);
        self.ratecard_keywords = lowercase_all(&self.ratecard_keywords);
        self.similarity_threshold = if self.similarity_threshold.is_nan() {
            DEFAULT_SIMILARITY_THRESHOLD
        } else {
            self.similarity_threshold.clamp(0.0, 1.0)
        };
        self
    }
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}
