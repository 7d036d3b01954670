//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success, every evaluated row matched                     |
//! | 1    | Run completed and found at least one mismatch            |
//! | 2    | Usage error (bad arguments, input file not found)        |
//! | 3    | Parsing error (input could not be read as a table)       |
//! | 4    | Validation error (required columns absent, no data rows) |
//! | 5    | Matching error (column lookup miss during matching)      |
//! | 6    | Export error (correction file, report or JSON not written)|
//! | 7    | Invalid config (TOML parse or column-mapping validation) |

use addrsync_recon::ErrorKind;

/// Success - command completed, nothing to correct.
pub const EXIT_SUCCESS: u8 = 0;

/// Mismatches found. Like `diff(1)`, exit 1 means "datasets differ."
pub const EXIT_MISMATCH: u8 = 1;

/// Usage error - bad arguments, missing input file.
pub const EXIT_USAGE: u8 = 2;

pub const EXIT_PARSE: u8 = 3;

pub const EXIT_VALIDATION: u8 = 4;

pub const EXIT_MATCHING: u8 = 5;

pub const EXIT_EXPORT: u8 = 6;

pub const EXIT_INVALID_CONFIG: u8 = 7;

/// Map an engine/io error kind to its exit code.
pub fn error_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Parsing => EXIT_PARSE,
        ErrorKind::Validation => EXIT_VALIDATION,
        ErrorKind::Matching => EXIT_MATCHING,
        ErrorKind::Export => EXIT_EXPORT,
        ErrorKind::Config => EXIT_INVALID_CONFIG,
    }
}
