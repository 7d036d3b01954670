use std::fmt;

use thiserror::Error;

/// Which side of the reconciliation a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// The dataset being checked and corrected.
    Candidate,
    /// The dataset treated as authoritative for addresses.
    Reference,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Candidate => write!(f, "candidate"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

/// Coarse error category. Callers surface this alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Ingestion could not produce a well-formed table.
    Parsing,
    /// Required columns absent, empty header row, or zero data rows.
    Validation,
    /// A column lookup named a column the table does not declare.
    Matching,
    /// Rendering or persisting the output failed.
    Export,
    /// Column-mapping config could not be parsed or is inconsistent.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsing => write!(f, "parsing"),
            Self::Validation => write!(f, "validation"),
            Self::Matching => write!(f, "matching"),
            Self::Export => write!(f, "export"),
            Self::Config => write!(f, "config"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReconError {
    /// Ingestion failure (unreadable file, malformed delimited text, no rows).
    #[error("{source_name}: {message}")]
    Parse { source_name: String, message: String },

    /// Header row is empty.
    #[error("{dataset}: header row not found")]
    NoHeaders { dataset: Dataset },

    /// One or more required columns are absent. Every missing column is named.
    #[error("{dataset}: missing required column(s): {}", .columns.join(", "))]
    MissingColumns { dataset: Dataset, columns: Vec<String> },

    /// Header row present but no data rows follow it.
    #[error("{dataset}: no data rows")]
    NoDataRows { dataset: Dataset },

    /// Column lookup miss during matching. Aborts the whole run.
    #[error("{dataset}: column '{column}' not found")]
    UnknownColumn { dataset: Dataset, column: String },

    /// Writing the correction file or report failed.
    #[error("export error: {0}")]
    Export(String),

    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error (blank column name, clashing columns, ...).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
}

impl ReconError {
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parsing,
            Self::NoHeaders { .. } | Self::MissingColumns { .. } | Self::NoDataRows { .. } => {
                ErrorKind::Validation
            }
            Self::UnknownColumn { .. } => ErrorKind::Matching,
            Self::Export(_) => ErrorKind::Export,
            Self::ConfigParse(_) | Self::ConfigValidation(_) => ErrorKind::Config,
        }
    }
}
