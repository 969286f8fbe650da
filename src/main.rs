//! Command-line adapter around the report pipeline.
//!
//! Reads the policy PDF and the excerpt file, runs one pipeline
//! invocation, and writes the report artifact. Exit code 0 on success,
//! 1 on any failure (message on stderr).

mod cli;

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gapscope::config;
use gapscope::pipeline::extraction::PdfTextExtractor;
use gapscope::pipeline::generation::GenerationBackend;
use gapscope::pipeline::report::ReportPipeline;

fn main() -> ExitCode {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let cli = cli::Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &cli::Cli) -> Result<(), String> {
    let document = fs::read(&cli.policy_pdf)
        .map_err(|e| format!("cannot read policy PDF {}: {e}", cli.policy_pdf.display()))?;
    let excerpt = fs::read_to_string(&cli.excerpt_file)
        .map_err(|e| format!("cannot read excerpt file {}: {e}", cli.excerpt_file.display()))?;

    let backend = GenerationBackend::from_config(cli.backend_config());
    let extractor = PdfTextExtractor;
    let pipeline = ReportPipeline::new(&extractor, &backend);

    let report = pipeline.run(&document, &excerpt).map_err(|e| e.to_string())?;

    fs::write(&cli.output, &report)
        .map_err(|e| format!("cannot write report to {}: {e}", cli.output.display()))?;

    tracing::info!(path = %cli.output.display(), "gap analysis report written");
    println!("Report written to {}", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli_for(policy: &std::path::Path, excerpt: &std::path::Path) -> cli::Cli {
        cli::Cli::try_parse_from([
            "gapscope",
            policy.to_str().unwrap(),
            excerpt.to_str().unwrap(),
            "--api-key",
            "sk-test",
        ])
        .unwrap()
    }

    #[test]
    fn missing_policy_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let excerpt = dir.path().join("excerpt.txt");
        fs::write(&excerpt, "A.9.4.3").unwrap();

        let cli = cli_for(&dir.path().join("absent.pdf"), &excerpt);
        let err = run(&cli).unwrap_err();
        assert!(err.contains("cannot read policy PDF"));
    }

    #[test]
    fn missing_excerpt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let policy = dir.path().join("policy.pdf");
        fs::write(&policy, b"%PDF-1.4").unwrap();

        let cli = cli_for(&policy, &dir.path().join("absent.txt"));
        let err = run(&cli).unwrap_err();
        assert!(err.contains("cannot read excerpt file"));
    }

    #[test]
    fn unreadable_pdf_fails_in_the_extraction_stage() {
        let dir = tempfile::tempdir().unwrap();
        let policy = dir.path().join("policy.pdf");
        let excerpt = dir.path().join("excerpt.txt");
        fs::write(&policy, b"not a pdf at all").unwrap();
        fs::write(&excerpt, "A.9.4.3 requires expiry <= 90 days.").unwrap();

        let err = run(&cli_for(&policy, &excerpt)).unwrap_err();
        assert!(err.contains("extraction failed"), "got: {err}");
    }
}
