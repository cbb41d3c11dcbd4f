use crate::config::ValidatorConfig;
use crate::diff::diff;
use crate::error::ValidationError;
use crate::extractor::{PdfBackend, PdfTextExtractor};
use crate::scanner::PatternScanner;
use crate::similarity::best_matches;
use crate::types::*;
use std::path::Path;
use std::time::{Duration, Instant};

/// Simple profiler that collects timings for pipeline steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        tracing::debug!(step = step_name, elapsed_ms = elapsed.as_millis() as u64, "step finished");
        self.timings.push((step_name.to_string(), elapsed));

        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn total(&self) -> Duration {
        self.timings.iter().map(|(_, d)| *d).sum()
    }

    pub fn log_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        let total = self.total();
        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                duration.as_secs_f64() / total.as_secs_f64() * 100.0
            };
            tracing::info!(
                step = step.as_str(),
                elapsed_ms = duration.as_millis() as u64,
                percent = %format!("{percentage:.1}"),
                "timing"
            );
        }
        tracing::info!(total_ms = total.as_millis() as u64, "validation timing total");
    }
}

/// Compares a main agreement against a client agreement and scans any
/// supporting documents.
///
/// Built once from an immutable `ValidatorConfig`; `validate` can be called
/// any number of times.
pub struct AgreementValidator {
    config: ValidatorConfig,
    scanner: PatternScanner,
    extractor: PdfTextExtractor,
}

impl AgreementValidator {
    /// Validator over the best PDF backend compiled into this build
    pub fn new(config: ValidatorConfig) -> Self {
        Self::new_with_extractor(config, PdfTextExtractor::new())
    }

    /// Create validator with full dependency injection
    pub fn new_with_extractor(config: ValidatorConfig, extractor: PdfTextExtractor) -> Self {
        let config = config.normalized();
        let scanner = PatternScanner::new(&config);
        Self {
            config,
            scanner,
            extractor,
        }
    }

    pub fn new_with_backend(config: ValidatorConfig, backend: impl PdfBackend + 'static) -> Self {
        Self::new_with_extractor(config, PdfTextExtractor::with_backend(backend))
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.config.similarity_threshold
    }

    pub fn backend_name(&self) -> &str {
        self.extractor.backend_name()
    }

    /// Whether the extractor expects to read `path`; other files still
    /// validate, they just come back empty
    pub fn supports_file_type(&self, path: &Path) -> bool {
        self.extractor.supports_file_type(path)
    }

    pub fn validate(
        &self,
        main_path: &Path,
        client_path: &Path,
        extra_documents: &[ExtraDocument],
    ) -> Result<ValidationReport, ValidationError> {
        self.validate_with_profiling(main_path, client_path, extra_documents, false)
    }

    pub fn validate_with_profiling(
        &self,
        main_path: &Path,
        client_path: &Path,
        extra_documents: &[ExtraDocument],
        enable_profiling: bool,
    ) -> Result<ValidationReport, ValidationError> {
        if main_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingInput("main"));
        }
        if client_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingInput("client"));
        }

        tracing::debug!(
            main = %main_path.display(),
            client = %client_path.display(),
            extra = extra_documents.len(),
            backend = self.extractor.backend_name(),
            "validating agreements"
        );

        let mut profiler = StepProfiler::new(enable_profiling);

        let main_text = profiler.time_step("Extract main", || self.extract_text(main_path));
        let client_text = profiler.time_step("Extract client", || self.extract_text(client_path));

        let main_scan = profiler.time_step("Scan main", || self.scanner.scan(&main_text));
        let client_scan = profiler.time_step("Scan client", || self.scanner.scan(&client_text));

        let text_diff = profiler.time_step("Diff", || diff(&main_text, &client_text));
        let samples =
            profiler.time_step("Clause similarity", || best_matches(&main_text, &client_text));

        let documents =
            profiler.time_step("Extra documents", || self.summarize_documents(extra_documents));

        profiler.log_summary();

        tracing::debug!(
            added = text_diff.added.len(),
            removed = text_diff.removed.len(),
            samples = samples.len(),
            documents = documents.len(),
            "validation complete"
        );

        Ok(ValidationReport::new(
            main_scan,
            client_scan,
            text_diff,
            samples,
            documents,
        ))
    }

    /// Each document is extracted and scanned on its own; one bad file
    /// yields an empty summary without touching the others
    fn summarize_documents(&self, extra_documents: &[ExtraDocument]) -> DocumentSummaries {
        let mut documents = DocumentSummaries::new();
        for (index, document) in extra_documents.iter().enumerate() {
            let text = self.extract_text(&document.path);
            let summary = DocumentSummary::new(self.scanner.scan(&text), &text);
            documents.insert(document.display_name(index), summary);
        }
        documents
    }

    fn extract_text(&self, path: &Path) -> String {
        self.extractor.extract(path).into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_main_path_is_rejected() {
        let validator = AgreementValidator::new_with_extractor(
            ValidatorConfig::default(),
            PdfTextExtractor::null(),
        );
        let err = validator
            .validate(Path::new(""), Path::new("client.pdf"), &[])
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingInput("main")));
    }

    #[test]
    fn test_empty_client_path_is_rejected() {
        let validator = AgreementValidator::new_with_extractor(
            ValidatorConfig::default(),
            PdfTextExtractor::null(),
        );
        let err = validator
            .validate(Path::new("main.pdf"), Path::new(""), &[])
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingInput("client")));
    }

    #[test]
    fn test_null_backend_produces_empty_report() {
        let validator = AgreementValidator::new_with_extractor(
            ValidatorConfig::default(),
            PdfTextExtractor::null(),
        );
        let report = validator
            .validate(
                Path::new("main.pdf"),
                Path::new("client.pdf"),
                &[ExtraDocument::new("coi.pdf")],
            )
            .unwrap();

        assert!(report.pan.main.is_empty());
        assert!(report.diff.is_empty());
        assert!(report.clause_similarity_samples.is_empty());
        let summary = report.documents.get("document_1.pdf").unwrap();
        assert_eq!(summary, &DocumentSummary::default());
    }

    #[test]
    fn test_config_is_normalized_on_construction() {
        let config = ValidatorConfig {
            coi_keywords: vec!["Certificate Of Incorporation".to_string()],
            similarity_threshold: -1.0,
            ..Default::default()
        };
        let validator = AgreementValidator::new_with_extractor(config, PdfTextExtractor::null());
        assert_eq!(validator.config().coi_keywords, vec!["certificate of incorporation"]);
        assert_eq!(validator.similarity_threshold(), 0.0);
    }

    #[test]
    fn test_profiler_records_only_when_enabled() {
        let mut profiler = StepProfiler::new(false);
        assert_eq!(profiler.time_step("noop", || 7), 7);
        assert!(profiler.timings().is_empty());

        let mut profiler = StepProfiler::new(true);
        profiler.time_step("first", || ());
        profiler.time_step("second", || ());
        let names: Vec<&str> = profiler.timings().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
