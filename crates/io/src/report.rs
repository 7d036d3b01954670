// Mismatch report: one line per reportable mismatch, for human review

use std::path::Path;

use addrsync_recon::{MatchResult, ReconError};

use crate::csv::{render_csv, write_with_bom};

pub const REPORT_HEADERS: [&str; 7] = [
    "identifier",
    "status",
    "candidate_address",
    "reference_address",
    "reference_postal_code",
    "reference_street",
    "street_duplication",
];

fn report_row(result: &MatchResult) -> Vec<String> {
    let (postal_code, street) = match &result.reference {
        Some(detail) => (detail.postal_code.clone(), detail.street.clone()),
        None => (String::new(), String::new()),
    };
    vec![
        result.identifier.clone(),
        result.status().to_string(),
        result.candidate_address.clone(),
        result.reference_address.clone(),
        postal_code,
        street,
        result.street_duplication.to_string(),
    ]
}

/// Render the mismatches among `results` (matched rows are skipped).
pub fn render_report(results: &[MatchResult]) -> Result<String, ReconError> {
    let mut records: Vec<Vec<String>> = vec![REPORT_HEADERS.iter().map(|h| h.to_string()).collect()];
    records.extend(results.iter().filter(|r| r.is_mismatch()).map(report_row));
    render_csv(records.iter().map(Vec::as_slice))
}

/// Write the mismatch report as a BOM-prefixed CSV.
pub fn write_report(results: &[MatchResult], path: &Path) -> Result<(), ReconError> {
    let rendered = render_report(results)?;
    write_with_bom(path, &rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrsync_recon::model::ReferenceDetail;

    fn results() -> Vec<MatchResult> {
        vec![
            MatchResult {
                identifier: "[1]".into(),
                candidate_address: "東京都新宿区1-2-3".into(),
                reference_address: "東京都新宿区".into(),
                is_match: true,
                street_duplication: 0,
                reference: None,
            },
            MatchResult {
                identifier: "[2]".into(),
                candidate_address: "東京都新宿区1-2-3".into(),
                reference_address: "東京都新宿区".into(),
                is_match: false,
                street_duplication: 1,
                reference: Some(ReferenceDetail {
                    postal_code: "160-0022".into(),
                    city_address: "東京都新宿区".into(),
                    street: "1-2-3".into(),
                }),
            },
            MatchResult {
                identifier: "[3]".into(),
                candidate_address: "北海道札幌市".into(),
                reference_address: "(データなし)".into(),
                is_match: false,
                street_duplication: 0,
                reference: None,
            },
        ]
    }

    #[test]
    fn lists_only_mismatches() {
        let rendered = render_report(&results()).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], REPORT_HEADERS.join(","));
        assert_eq!(
            lines[1],
            "[2],address_mismatch,東京都新宿区1-2-3,東京都新宿区,160-0022,1-2-3,1"
        );
        assert_eq!(lines[2], "[3],no_reference,北海道札幌市,(データなし),,,0");
    }

    #[test]
    fn written_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_report(&results(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('\u{FEFF}'));
        assert!(content.contains("no_reference"));
    }
}
