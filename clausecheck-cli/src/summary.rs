//! Human-readable report summary printed by the CLI
//!
//! The JSON report is the real output; this is the short overview shown on
//! stdout after a run.

use clausecheck_core::{SimilaritySample, ValidationReport};

/// Characters of a line shown before it is cut with an ellipsis
const PREVIEW_CHARS: usize = 60;

pub fn render_summary(report: &ValidationReport, threshold: f64) -> String {
    let mut out = String::new();

    out.push_str("🔎 Identifiers:\n");
    out.push_str(&format!(
        "   - PAN  main: {:<30} client: {}\n",
        list(&report.pan.main),
        list(&report.pan.client)
    ));
    out.push_str(&format!(
        "   - GST  main: {:<30} client: {}\n",
        list(&report.gst.main),
        list(&report.gst.client)
    ));

    out.push_str("📑 Required sections:\n");
    out.push_str(&format!(
        "   - COI        main: {:<24} client: {}\n",
        list(&report.coi_keywords.main),
        list(&report.coi_keywords.client)
    ));
    out.push_str(&format!(
        "   - Rate card  main: {:<24} client: {}\n",
        list(&report.rate_keywords.main),
        list(&report.rate_keywords.client)
    ));

    out.push_str(&format!(
        "✏️  Diff: {} added span(s), {} removed span(s)\n",
        report.diff.added.len(),
        report.diff.removed.len()
    ));

    let below = report.samples_below(threshold);
    out.push_str(&format!(
        "📊 Clause similarity: {} sampled line(s), {} below {:.2}\n",
        report.clause_similarity_samples.len(),
        below.len(),
        threshold
    ));
    for sample in below {
        out.push_str(&format!("   ⚠️  {}\n", sample_line(sample)));
    }

    if !report.documents.is_empty() {
        out.push_str("📎 Supporting documents:\n");
        for (name, summary) in report.documents.iter() {
            out.push_str(&format!(
                "   - {name}: PAN {}, GST {}, COI {}, rate card {}\n",
                summary.scan.pan.len(),
                summary.scan.gst.len(),
                yes_no(!summary.scan.coi_keywords.is_empty()),
                yes_no(!summary.scan.rate_keywords.is_empty()),
            ));
        }
    }

    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

fn sample_line(sample: &SimilaritySample) -> String {
    let best = sample
        .best_match
        .as_deref()
        .map(preview)
        .unwrap_or_else(|| "(no match)".to_string());
    format!("{:.2}  '{}' -> '{}'", sample.score, preview(&sample.main), best)
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}…")
    }
}
