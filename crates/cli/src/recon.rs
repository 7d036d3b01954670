//! `addrsync run` / `validate` / `config`: file-driven address reconciliation.

use std::path::{Path, PathBuf};

use addrsync_recon::{ReconConfig, ReconResult};
use tracing::debug;

use crate::exit_codes::{EXIT_EXPORT, EXIT_INVALID_CONFIG, EXIT_MISMATCH};
use crate::CliError;

pub struct RunArgs {
    pub candidate: PathBuf,
    pub reference: PathBuf,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub json: bool,
    pub json_out: Option<PathBuf>,
    pub quiet: bool,
}

fn load_config(path: Option<&Path>) -> Result<ReconConfig, CliError> {
    let Some(path) = path else {
        return Ok(ReconConfig::default());
    };
    let config_str = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(EXIT_INVALID_CONFIG, format!("cannot read config {}: {e}", path.display()))
    })?;
    let config = ReconConfig::from_toml(&config_str)?;
    debug!(path = %path.display(), name = %config.name, "loaded config");
    Ok(config)
}

fn require_file(path: &Path, role: &str) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::args(format!("{role} file not found: {}", path.display()))
            .with_hint("usage: addrsync run <candidate> <reference>"))
    }
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    require_file(&args.candidate, "candidate")?;
    require_file(&args.reference, "reference")?;

    let config = load_config(args.config.as_deref())?;

    let candidate = addrsync_io::import(&args.candidate)?;
    let reference = addrsync_io::import(&args.reference)?;

    let result = addrsync_recon::run(&config, &candidate, &reference)?;

    let written = if result.corrections.is_empty() {
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(addrsync_io::default_output_name(chrono::Utc::now())));
        addrsync_io::export(&result.corrections, &path)?;
        Some(path)
    };

    if let Some(ref path) = args.report {
        addrsync_io::report::write_report(&result.results, path)?;
    }

    if let Some(ref path) = args.json_out {
        addrsync_io::json::export(&result, path)?;
    }

    if args.json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::new(EXIT_EXPORT, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if !args.quiet {
        print_summary(&result, written.as_deref(), &args);
    }

    let mismatched = result.summary.mismatched;
    if mismatched > 0 {
        let message = if args.quiet {
            String::new()
        } else {
            format!("{mismatched} mismatch(es) found")
        };
        return Err(CliError::new(EXIT_MISMATCH, message));
    }

    Ok(())
}

// Human summary to stderr
fn print_summary(result: &ReconResult, written: Option<&Path>, args: &RunArgs) {
    let s = &result.summary;
    eprintln!(
        "address recon: {} rows evaluated: {} matched, {} mismatched ({} without reference data)",
        s.evaluated, s.matched, s.mismatched, s.no_reference,
    );
    if s.skipped_without_identifier > 0 {
        eprintln!("skipped {} row(s) without an identifier", s.skipped_without_identifier);
    }
    if s.street_duplications > 0 {
        eprintln!("{} row(s) with the street already in the city field", s.street_duplications);
    }
    if result.meta.reference_rows_overwritten > 0 {
        eprintln!(
            "warning: {} duplicate reference identifier(s), later rows used",
            result.meta.reference_rows_overwritten
        );
    }

    if args.json {
        return;
    }
    for m in result.mismatches() {
        eprintln!(
            "  {}  {}  {}  {}",
            m.identifier,
            m.status(),
            m.candidate_address,
            m.reference_address
        );
    }

    match written {
        Some(path) => eprintln!("wrote {} correction row(s) to {}", s.correction_rows, path.display()),
        None => eprintln!("no corrections to write"),
    }
    if let Some(ref path) = args.report {
        eprintln!("wrote report {}", path.display());
    }
    if let Some(ref path) = args.json_out {
        eprintln!("wrote {}", path.display());
    }
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(config_path.as_path()))?;
    eprintln!(
        "config '{}' is valid: {} candidate and {} reference required column(s)",
        config.name,
        config.required_candidate_columns().len(),
        config.required_reference_columns().len(),
    );
    Ok(())
}

pub fn cmd_config() -> Result<(), CliError> {
    let rendered = ReconConfig::default().to_toml()?;
    print!("{rendered}");
    Ok(())
}
