//! `addrsync-recon`: job-posting address reconciliation engine.
//!
//! Pure engine crate: receives already-parsed tables, returns per-row match
//! results and the correction table. No file IO.

pub mod config;
pub mod correction;
pub mod engine;
pub mod error;
pub mod identifier;
pub mod index;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod summary;
pub mod table;

pub use config::ReconConfig;
pub use engine::run;
pub use error::{Dataset, ErrorKind, ReconError};
pub use model::{CorrectionTable, MatchResult, MatchStatus, ReconResult, ReconSummary};
pub use table::ParsedTable;
