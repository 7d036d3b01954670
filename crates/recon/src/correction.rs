//! Correction-file synthesis for the candidate system's bulk-update import.

use std::collections::HashSet;

use tracing::debug;

use crate::config::ReconConfig;
use crate::error::{Dataset, ReconError};
use crate::identifier::extract_identifier;
use crate::index::{ReferenceIndex, ReferenceRecord};
use crate::model::{CorrectionTable, MatchResult};
use crate::table::{cell, ParsedTable};

/// Hyphen and minus variants removed from postal codes.
const POSTAL_HYPHENS: [char; 4] = ['-', '\u{2010}', '\u{2212}', '\u{FF0D}'];

/// Postal code with every hyphen variant removed.
pub fn strip_postal_hyphens(postal_code: &str) -> String {
    postal_code
        .chars()
        .filter(|c| !POSTAL_HYPHENS.contains(c))
        .collect()
}

/// What a candidate column becomes in a correction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRole {
    OperationCode,
    PostalCode,
    City,
    Street,
    PassThrough,
}

fn column_roles(headers: &[String], config: &ReconConfig) -> Vec<ColumnRole> {
    let c = &config.candidate;
    headers
        .iter()
        .map(|h| {
            if *h == c.operation_code {
                ColumnRole::OperationCode
            } else if *h == c.postal_code {
                ColumnRole::PostalCode
            } else if *h == c.city {
                ColumnRole::City
            } else if *h == c.street {
                ColumnRole::Street
            } else {
                ColumnRole::PassThrough
            }
        })
        .collect()
}

fn correction_row(
    row: &[String],
    roles: &[ColumnRole],
    record: &ReferenceRecord,
    config: &ReconConfig,
) -> Vec<String> {
    roles
        .iter()
        .enumerate()
        .map(|(i, role)| match role {
            ColumnRole::OperationCode => config.output.update_operation_code.clone(),
            ColumnRole::PostalCode => strip_postal_hyphens(&record.postal_code),
            ColumnRole::City => record.composed_address(),
            ColumnRole::Street => record.street.clone(),
            ColumnRole::PassThrough => cell(row, i).to_string(),
        })
        .collect()
}

/// Rebuild every mismatched candidate row with its address fields taken from
/// the reference record.
///
/// Identifiers are re-derived from each candidate row. Rows whose identifier
/// is not among `mismatches`, or has no reference record, are skipped: a
/// "no reference data" mismatch is reported but never exported.
pub fn build_corrections(
    candidate: &ParsedTable,
    mismatches: &[MatchResult],
    index: &ReferenceIndex,
    config: &ReconConfig,
) -> Result<CorrectionTable, ReconError> {
    let comment_idx = candidate.column_index(Dataset::Candidate, &config.candidate.comment)?;
    let wanted: HashSet<&str> = mismatches.iter().map(|m| m.identifier.as_str()).collect();
    let roles = column_roles(candidate.headers(), config);

    let mut table = CorrectionTable {
        headers: candidate.headers().to_vec(),
        rows: Vec::new(),
    };

    for row in candidate.rows() {
        let identifier = extract_identifier(cell(row, comment_idx));
        if !wanted.contains(identifier.as_str()) {
            continue;
        }
        let Some(record) = index.get(&identifier) else {
            debug!(%identifier, "mismatch without reference data, not exported");
            continue;
        };
        table.rows.push(correction_row(row, &roles, record, config));
    }

    Ok(table)
}
