use serde::Serialize;

// ---------------------------------------------------------------------------
// Match results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    /// Reference record found, addresses disagree. Correctable.
    AddressMismatch,
    /// No reference record for the identifier. Reported, never exported.
    NoReference,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::AddressMismatch => write!(f, "address_mismatch"),
            Self::NoReference => write!(f, "no_reference"),
        }
    }
}

/// Reference-side values shown next to a mismatch so it can be corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDetail {
    pub postal_code: String,
    /// Prefecture + city.
    pub city_address: String,
    pub street: String,
}

/// Outcome for one candidate row that carried an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub identifier: String,
    /// Candidate city + street.
    pub candidate_address: String,
    /// Reference prefecture + city, or the no-reference sentinel.
    pub reference_address: String,
    pub is_match: bool,
    /// 1 when the reference street is already folded into the candidate city.
    pub street_duplication: u8,
    /// Set only on mismatches that have a reference record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceDetail>,
}

impl MatchResult {
    pub fn status(&self) -> MatchStatus {
        if self.is_match {
            MatchStatus::Matched
        } else if self.reference.is_some() {
            MatchStatus::AddressMismatch
        } else {
            MatchStatus::NoReference
        }
    }

    /// Reportable: any non-match, with or without reference data.
    pub fn is_mismatch(&self) -> bool {
        !self.is_match
    }

    /// Actionable: a non-match that has a reference address to correct to.
    pub fn is_correctable(&self) -> bool {
        !self.is_match && self.reference.is_some()
    }
}

// ---------------------------------------------------------------------------
// Correction output
// ---------------------------------------------------------------------------

/// Candidate header row plus one rewritten row per correctable mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CorrectionTable {
    /// True when there are no correction rows (the header alone is not output).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Header row followed by the data rows, ready for rendering.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.headers.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub candidate_rows: usize,
    pub evaluated: usize,
    pub skipped_without_identifier: usize,
    pub matched: usize,
    pub mismatched: usize,
    /// Subset of `mismatched` with no reference record.
    pub no_reference: usize,
    pub street_duplications: usize,
    pub correction_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub reference_rows_indexed: usize,
    pub reference_rows_overwritten: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub results: Vec<MatchResult>,
    pub corrections: CorrectionTable,
}

impl ReconResult {
    pub fn mismatches(&self) -> impl Iterator<Item = &MatchResult> {
        self.results.iter().filter(|r| r.is_mismatch())
    }
}
