use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ReferenceColumns;
use crate::error::{Dataset, ReconError};
use crate::table::{cell, ParsedTable};

/// One reference-dataset row, reduced to the fields the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRecord {
    pub identifier: String,
    pub postal_code: String,
    pub prefecture: String,
    pub city: String,
    pub street: String,
    /// Pass-through descriptive columns, keyed by header text.
    pub extra: BTreeMap<String, String>,
}

impl ReferenceRecord {
    /// Prefecture followed by city, no separator.
    pub fn composed_address(&self) -> String {
        format!("{}{}", self.prefecture, self.city)
    }
}

/// Identifier → reference record. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    records: HashMap<String, ReferenceRecord>,
    overwritten: usize,
}

impl ReferenceIndex {
    /// Index every reference row that has a non-empty identifier.
    ///
    /// Duplicate identifiers are last-write-wins: the later row replaces the
    /// earlier one. Each replacement is logged and counted, never rejected.
    pub fn build(table: &ParsedTable, columns: &ReferenceColumns) -> Result<Self, ReconError> {
        let ds = Dataset::Reference;
        let id_idx = table.column_index(ds, &columns.identifier)?;
        let postal_idx = table.column_index(ds, &columns.postal_code)?;
        let prefecture_idx = table.column_index(ds, &columns.prefecture)?;
        let city_idx = table.column_index(ds, &columns.city)?;
        let street_idx = table.column_index(ds, &columns.street)?;

        // Pass-through columns never take part in matching; absent ones are
        // left out of `extra` instead of failing the run.
        let extra_cols: Vec<(&str, usize)> = columns
            .passthrough
            .iter()
            .filter_map(|name| {
                table
                    .column_index(ds, name)
                    .ok()
                    .map(|idx| (name.as_str(), idx))
            })
            .collect();

        let mut index = Self::default();
        let mut skipped = 0usize;

        for row in table.rows() {
            let identifier = cell(row, id_idx);
            if identifier.is_empty() {
                skipped += 1;
                continue;
            }

            let record = ReferenceRecord {
                identifier: identifier.to_string(),
                postal_code: cell(row, postal_idx).to_string(),
                prefecture: cell(row, prefecture_idx).to_string(),
                city: cell(row, city_idx).to_string(),
                street: cell(row, street_idx).to_string(),
                extra: extra_cols
                    .iter()
                    .map(|(name, idx)| (name.to_string(), cell(row, *idx).to_string()))
                    .collect(),
            };

            if index.records.insert(record.identifier.clone(), record).is_some() {
                warn!(identifier, "duplicate reference identifier, keeping the later row");
                index.overwritten += 1;
            }
        }

        debug!(
            indexed = index.records.len(),
            skipped_without_identifier = skipped,
            overwritten = index.overwritten,
            "reference index built"
        );
        Ok(index)
    }

    pub fn get(&self, identifier: &str) -> Option<&ReferenceRecord> {
        self.records.get(identifier)
    }

    /// Distinct identifiers indexed.
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Rows replaced by a later row carrying the same identifier.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}
