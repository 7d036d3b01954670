use tracing::debug;

use crate::config::ReconConfig;
use crate::error::{Dataset, ReconError};
use crate::identifier::extract_identifier;
use crate::index::ReferenceIndex;
use crate::model::{MatchResult, ReferenceDetail};
use crate::normalize::normalize_address;
use crate::table::{cell, ParsedTable};

/// 1 when a non-empty reference street already appears inside the raw
/// candidate city field, else 0.
///
/// Guards against street text that prior processing folded into the city
/// column, which would otherwise let the prefix test pass spuriously.
pub fn street_duplication(candidate_city: &str, reference_street: &str) -> u8 {
    if !reference_street.is_empty() && candidate_city.contains(reference_street) {
        1
    } else {
        0
    }
}

/// Address-match rule.
///
/// Both addresses must be non-empty, the normalized candidate must start with
/// the normalized reference, and the duplication flag must be 0. A set flag
/// forces `false` regardless of the prefix test.
pub fn address_matches(candidate_address: &str, reference_address: &str, duplication: u8) -> bool {
    if duplication != 0 {
        return false;
    }
    if candidate_address.is_empty() || reference_address.is_empty() {
        return false;
    }
    normalize_address(candidate_address).starts_with(&normalize_address(reference_address))
}

/// Evaluate every candidate row against the index, in input order.
///
/// Rows without an extractable identifier produce no result. Identifiers are
/// not deduplicated.
pub fn match_rows(
    candidate: &ParsedTable,
    index: &ReferenceIndex,
    config: &ReconConfig,
) -> Result<Vec<MatchResult>, ReconError> {
    let ds = Dataset::Candidate;
    let comment_idx = candidate.column_index(ds, &config.candidate.comment)?;
    let city_idx = candidate.column_index(ds, &config.candidate.city)?;
    let street_idx = candidate.column_index(ds, &config.candidate.street)?;

    let mut results = Vec::with_capacity(candidate.len());

    for (row_no, row) in candidate.rows().iter().enumerate() {
        let identifier = extract_identifier(cell(row, comment_idx));
        if identifier.is_empty() {
            continue;
        }

        let city = cell(row, city_idx);
        let candidate_address = format!("{city}{}", cell(row, street_idx));

        let Some(record) = index.get(&identifier) else {
            debug!(row = row_no + 1, %identifier, "no reference record");
            results.push(MatchResult {
                identifier,
                candidate_address,
                reference_address: config.output.no_reference_sentinel.clone(),
                is_match: false,
                street_duplication: 0,
                reference: None,
            });
            continue;
        };

        let reference_address = record.composed_address();
        let duplication = street_duplication(city, &record.street);
        let is_match = address_matches(&candidate_address, &reference_address, duplication);

        if duplication == 1 {
            debug!(row = row_no + 1, %identifier, street = %record.street, "street already folded into city");
        }

        let reference = (!is_match).then(|| ReferenceDetail {
            postal_code: record.postal_code.clone(),
            city_address: reference_address.clone(),
            street: record.street.clone(),
        });

        results.push(MatchResult {
            identifier,
            candidate_address,
            reference_address,
            is_match,
            street_duplication: duplication,
            reference,
        });
    }

    Ok(results)
}

/// Non-matching results, order preserved.
pub fn filter_mismatches(results: &[MatchResult]) -> Vec<MatchResult> {
    results.iter().filter(|r| r.is_mismatch()).cloned().collect()
}
