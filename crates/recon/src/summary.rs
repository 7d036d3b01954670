use crate::model::{CorrectionTable, MatchResult, MatchStatus, ReconSummary};

/// Compute summary counts from match results and the correction table.
pub fn compute_summary(
    candidate_rows: usize,
    results: &[MatchResult],
    corrections: &CorrectionTable,
) -> ReconSummary {
    let mut matched = 0;
    let mut no_reference = 0;
    let mut mismatched = 0;
    let mut street_duplications = 0;

    for r in results {
        match r.status() {
            MatchStatus::Matched => matched += 1,
            MatchStatus::AddressMismatch => mismatched += 1,
            MatchStatus::NoReference => {
                mismatched += 1;
                no_reference += 1;
            }
        }
        if r.street_duplication != 0 {
            street_duplications += 1;
        }
    }

    ReconSummary {
        candidate_rows,
        evaluated: results.len(),
        skipped_without_identifier: candidate_rows.saturating_sub(results.len()),
        matched,
        mismatched,
        no_reference,
        street_duplications,
        correction_rows: corrections.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceDetail;

    fn result(is_match: bool, has_reference: bool, dup: u8) -> MatchResult {
        MatchResult {
            identifier: "[k]".into(),
            candidate_address: "a".into(),
            reference_address: "b".into(),
            is_match,
            street_duplication: dup,
            reference: has_reference.then(|| ReferenceDetail {
                postal_code: String::new(),
                city_address: "b".into(),
                street: String::new(),
            }),
        }
    }

    #[test]
    fn summary_counts() {
        let results = vec![
            result(true, false, 0),
            result(true, false, 0),
            result(false, true, 1),
            result(false, true, 0),
            result(false, false, 0),
        ];
        let corrections = CorrectionTable {
            headers: vec!["h".into()],
            rows: vec![vec!["x".into()], vec!["y".into()]],
        };
        let summary = compute_summary(7, &results, &corrections);
        assert_eq!(summary.candidate_rows, 7);
        assert_eq!(summary.evaluated, 5);
        assert_eq!(summary.skipped_without_identifier, 2);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.mismatched, 3);
        assert_eq!(summary.no_reference, 1);
        assert_eq!(summary.street_duplications, 1);
        assert_eq!(summary.correction_rows, 2);
    }
}
