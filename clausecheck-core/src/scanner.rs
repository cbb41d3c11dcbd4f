use crate::config::{ValidatorConfig, DEFAULT_GST_REGEX, DEFAULT_PAN_REGEX};
use crate::types::ScanResult;
use regex::Regex;

/// Compiled identifier patterns and keyword lists for scanning document text
#[derive(Debug, Clone)]
pub struct PatternScanner {
    pan: Regex,
    gst: Regex,
    coi_keywords: Vec<String>,
    ratecard_keywords: Vec<String>,
}

impl PatternScanner {
    /// Compile patterns from config. Never fails: an empty or invalid
    /// pattern is replaced by the built-in default.
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            pan: compile_or_default(&config.pan_regex, DEFAULT_PAN_REGEX),
            gst: compile_or_default(&config.gst_regex, DEFAULT_GST_REGEX),
            coi_keywords: lowercase_all(&config.coi_keywords),
            ratecard_keywords: lowercase_all(&config.ratecard_keywords),
        }
    }

    pub fn pan_pattern(&self) -> &str {
        self.pan.as_str()
    }

    pub fn gst_pattern(&self) -> &str {
        self.gst.as_str()
    }

    pub fn find_identifiers(&self, text: &str) -> (Vec<String>, Vec<String>) {
        find_identifiers(text, &self.pan, &self.gst)
    }

    pub fn scan(&self, text: &str) -> ScanResult {
        let (pan, gst) = self.find_identifiers(text);
        ScanResult {
            pan,
            gst,
            coi_keywords: find_keywords(text, &self.coi_keywords),
            rate_keywords: find_keywords(text, &self.ratecard_keywords),
        }
    }
}

impl Default for PatternScanner {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}

fn compile_or_default(pattern: &str, fallback: &str) -> Regex {
    if pattern.is_empty() {
        return default_regex(fallback);
    }
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::debug!(pattern, error = %e, "invalid pattern, using default");
            default_regex(fallback)
        }
    }
}

fn default_regex(pattern: &str) -> Regex {
    // Built-in patterns are constants covered by tests
    Regex::new(pattern).unwrap_or_else(|e| unreachable!("built-in pattern {pattern:?}: {e}"))
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

/// All PAN and GST matches in order of appearance, duplicates included
pub fn find_identifiers(text: &str, pan_re: &Regex, gst_re: &Regex) -> (Vec<String>, Vec<String>) {
    if text.is_empty() {
        return (Vec::new(), Vec::new());
    }
    (find_all(text, pan_re), find_all(text, gst_re))
}

/// Non-overlapping matches; reports the first capture group when the
/// pattern has one, the whole match otherwise
fn find_all(text: &str, re: &Regex) -> Vec<String> {
    if re.captures_len() > 1 {
        re.captures_iter(text)
            .map(|caps| caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string())
            .collect()
    } else {
        re.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

/// Keywords (in list order) whose lowercase form occurs in the text
pub fn find_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| haystack.contains(&k.to_lowercase()))
        .cloned()
        .collect()
}
