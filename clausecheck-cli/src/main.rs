use anyhow::{bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// Import from clausecheck-core
use clausecheck_core::{AgreementValidator, ExtraDocument, ValidationReport, ValidatorConfig};

// Import CLI utilities
use clausecheck::render_summary;

#[derive(Parser)]
#[command(name = "clausecheck")]
#[command(about = "Compare a main and a client agreement: tax IDs, required sections, diffs and clause similarity")]
struct Args {
    /// Path to the main (reference) agreement PDF
    #[arg(short, long)]
    main: Option<PathBuf>,

    /// Path to the client agreement PDF
    #[arg(short = 'k', long)]
    client: Option<PathBuf>,

    /// Supporting document to scan (repeatable)
    #[arg(short, long = "document")]
    documents: Vec<PathBuf>,

    /// Display name for the supporting document at the same position (repeatable)
    #[arg(short = 'n', long = "document-name")]
    document_names: Vec<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file path (if not specified, auto-generated from the main agreement)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: json or compact
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    show_config: bool,

    /// Log per-step timings
    #[arg(long)]
    profile: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Exit with status 2 when any sampled clause scores below the threshold
    #[arg(long)]
    fail_below_threshold: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose || args.profile);

    let config = ValidatorConfig::load_with_fallback(args.config.as_deref());
    tracing::debug!(?config, "effective configuration");

    // Nothing but the YAML goes to stdout in this mode
    if args.show_config {
        print!("{}", show_config_output(&config)?);
        return Ok(());
    }

    println!("🦀 Clausecheck Agreement Validator");
    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path.display());
    } else {
        println!("📋 Using default config");
    }

    let (Some(main_path), Some(client_path)) = (&args.main, &args.client) else {
        bail!("both --main and --client are required");
    };
    if args.document_names.len() > args.documents.len() {
        println!(
            "⚠️  {} document name(s) given for {} document(s); extra names ignored",
            args.document_names.len(),
            args.documents.len()
        );
    }

    let validator = AgreementValidator::new(config);
    println!("🚀 Using {} backend", validator.backend_name());
    println!("📄 Main:   {}", main_path.display());
    println!("📄 Client: {}", client_path.display());
    for path in unsupported_documents(&validator, &args.documents) {
        println!("⚠️  Not a .pdf file, its text may come back empty: {}", path.display());
    }

    let extra = extra_documents(&args.documents, &args.document_names);
    let report = match validator.validate_with_profiling(main_path, client_path, &extra, args.profile) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ Validation failed: {e}");
            std::process::exit(1);
        }
    };
    println!("✅ Validation complete\n");

    let threshold = validator.similarity_threshold();
    print!("{}", render_summary(&report, threshold));

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(main_path));
    save_report(&report, &output_path, &args.format)?;

    if args.fail_below_threshold && !report.samples_below(threshold).is_empty() {
        std::process::exit(2);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn show_config_output(config: &ValidatorConfig) -> Result<String> {
    config.to_yaml_string()
}

fn unsupported_documents<'a>(validator: &AgreementValidator, paths: &'a [PathBuf]) -> Vec<&'a PathBuf> {
    paths
        .iter()
        .filter(|path| !validator.supports_file_type(path))
        .collect()
}

/// Pairs paths with names by position; unnamed documents get the default name
fn extra_documents(paths: &[PathBuf], names: &[String]) -> Vec<ExtraDocument> {
    paths
        .iter()
        .enumerate()
        .map(|(index, path)| match names.get(index) {
            Some(name) => ExtraDocument::named(path, name),
            None => ExtraDocument::new(path),
        })
        .collect()
}

fn default_output_path(main_path: &Path) -> PathBuf {
    let input_name = main_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("agreement");
    PathBuf::from(format!("{input_name}_validation.json"))
}

fn save_report(report: &ValidationReport, output_path: &Path, format: &str) -> Result<()> {
    report.save_with_format(output_path, format)?;
    println!("\n💾 Report saved to: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausecheck_core::PdfTextExtractor;

    #[test]
    fn test_names_pair_by_position() {
        let docs = extra_documents(
            &[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
            &["coi.pdf".to_string()],
        );
        assert_eq!(docs[0].display_name(0), "coi.pdf");
        assert_eq!(docs[1].display_name(1), "document_2.pdf");
    }

    #[test]
    fn test_show_config_output_is_plain_yaml() {
        let config = ValidatorConfig {
            similarity_threshold: 0.5,
            ..Default::default()
        };
        let output = show_config_output(&config).unwrap();
        assert!(!output.contains("Clausecheck"));
        assert_eq!(ValidatorConfig::from_yaml_str(&output).unwrap(), config);
    }

    #[test]
    fn test_non_pdf_documents_are_flagged() {
        let validator =
            AgreementValidator::new_with_extractor(ValidatorConfig::default(), PdfTextExtractor::null());
        let paths = vec![
            PathBuf::from("coi.pdf"),
            PathBuf::from("rates.xlsx"),
            PathBuf::from("SCAN.PDF"),
        ];
        assert_eq!(unsupported_documents(&validator, &paths), vec![&paths[1]]);
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/master_agreement.pdf")),
            PathBuf::from("master_agreement_validation.json")
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "clausecheck",
            "--main",
            "main.pdf",
            "--client",
            "client.pdf",
            "-d",
            "a.pdf",
            "-d",
            "b.pdf",
            "-n",
            "coi.pdf",
        ])
        .unwrap();
        assert_eq!(args.documents.len(), 2);
        assert_eq!(args.document_names, vec!["coi.pdf"]);
        assert_eq!(args.format, "json");
    }
}
