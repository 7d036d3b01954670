// addrsync CLI - reconcile job-posting addresses against the reference export

mod exit_codes;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use addrsync_recon::ReconError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{error_exit_code, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "addrsync")]
#[command(about = "Reconcile job-posting addresses against a reference dataset and emit corrections")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log pipeline stages to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare candidate addresses with the reference and write a correction file
    #[command(after_help = "\
Examples:
  addrsync run jobs.csv reference.xlsx
  addrsync run jobs.csv reference.csv --output fix.csv --report mismatches.csv
  addrsync run jobs.csv reference.csv --config columns.toml --json

Exit codes:
  0  every row matched (no correction file written)
  1  mismatches found
  2  usage error
  3  parsing error
  4  validation error (missing columns, no data rows)
  5  matching error
  6  export error
  7  invalid config")]
    Run {
        /// Dataset to check and correct (CSV/TSV or Excel)
        candidate: PathBuf,

        /// Authoritative dataset (CSV/TSV or Excel)
        reference: PathBuf,

        /// Column-mapping config (TOML); defaults match the standard exports
        #[arg(long, short = 'c', env = "ADDRSYNC_CONFIG")]
        config: Option<PathBuf>,

        /// Correction file path (.csv or .xlsx) [default: 住所修正データ_<timestamp>.csv]
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write a mismatch report (CSV) for review
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print the full result as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Write the full result as JSON to a file
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Suppress the human summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a column-mapping config without running
    #[command(after_help = "\
Examples:
  addrsync validate columns.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },

    /// Print the default config as TOML
    #[command(after_help = "\
Examples:
  addrsync config > columns.toml")]
    Config,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  addrsync-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            candidate,
            reference,
            config,
            output,
            report,
            json,
            json_out,
            quiet,
        } => recon::cmd_run(recon::RunArgs {
            candidate,
            reference,
            config,
            output,
            report,
            json,
            json_out,
            quiet,
        }),
        Commands::Validate { config } => recon::cmd_validate(config),
        Commands::Config => recon::cmd_config(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let hint = match &err {
            ReconError::MissingColumns { .. } | ReconError::UnknownColumn { .. } => Some(
                "check the column names in --config (see `addrsync config` for the defaults)",
            ),
            ReconError::NoHeaders { .. } => Some("the first row must hold the column names"),
            ReconError::ConfigParse(_) => Some("run `addrsync config` for a valid template"),
            _ => None,
        };
        Self {
            code: error_exit_code(err.kind()),
            message: format!("[{}] {}", err.kind(), err),
            hint: hint.map(str::to_string),
        }
    }
}
