use tracing::info;

use crate::config::ReconConfig;
use crate::correction::build_corrections;
use crate::error::{Dataset, ReconError};
use crate::index::ReferenceIndex;
use crate::matcher::{filter_mismatches, match_rows};
use crate::model::{ReconMeta, ReconResult};
use crate::summary::compute_summary;
use crate::table::ParsedTable;

/// Run one reconciliation. Returns per-row results, the correction table, and
/// a summary.
///
/// Both tables are re-validated against the config's required columns first.
/// Any error aborts the run; no partial result is returned.
pub fn run(
    config: &ReconConfig,
    candidate: &ParsedTable,
    reference: &ParsedTable,
) -> Result<ReconResult, ReconError> {
    candidate.validate(Dataset::Candidate, &config.required_candidate_columns())?;
    reference.validate(Dataset::Reference, &config.required_reference_columns())?;

    let index = ReferenceIndex::build(reference, &config.reference)?;
    info!(
        rows = reference.len(),
        indexed = index.len(),
        overwritten = index.overwritten(),
        "indexed reference dataset"
    );

    let results = match_rows(candidate, &index, config)?;
    let mismatches = filter_mismatches(&results);
    info!(
        rows = candidate.len(),
        evaluated = results.len(),
        mismatched = mismatches.len(),
        "matched candidate addresses"
    );

    let corrections = build_corrections(candidate, &mismatches, &index, config)?;
    info!(rows = corrections.len(), "built correction rows");

    let summary = compute_summary(candidate.len(), &results, &corrections);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            reference_rows_indexed: index.len(),
            reference_rows_overwritten: index.overwritten(),
        },
        summary,
        results,
        corrections,
    })
}
