//! Uniform header/row model shared by ingestion and the engine.
//!
//! Rows are ordered lists of opaque strings addressed through a header-name
//! lookup. Rows may be shorter than the header row; missing trailing cells
//! read as the empty string.

use crate::error::{Dataset, ReconError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (header row excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Position of `name` in the header row. First occurrence wins.
    pub fn column_index(&self, dataset: Dataset, name: &str) -> Result<usize, ReconError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::UnknownColumn {
                dataset,
                column: name.to_string(),
            })
    }

    /// Check a table against a list of required column names.
    ///
    /// Fails on an empty header row, then on missing columns (all of them named
    /// in one error), then on zero data rows.
    pub fn validate(&self, dataset: Dataset, required: &[&str]) -> Result<(), ReconError> {
        if self.headers.is_empty() {
            return Err(ReconError::NoHeaders { dataset });
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|col| !self.has_column(col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ReconError::MissingColumns {
                dataset,
                columns: missing,
            });
        }

        if self.rows.is_empty() {
            return Err(ReconError::NoDataRows { dataset });
        }

        Ok(())
    }
}

/// Cell at `idx`, or `""` when the row is shorter than the header.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn table(headers: &[&str], rows: &[&[&str]]) -> ParsedTable {
        ParsedTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn short_rows_read_as_empty() {
        let t = table(&["a", "b", "c"], &[&["1"]]);
        let row = &t.rows()[0];
        assert_eq!(cell(row, t.column_index(Dataset::Candidate, "a").unwrap()), "1");
        assert_eq!(cell(row, t.column_index(Dataset::Candidate, "c").unwrap()), "");
    }

    #[test]
    fn first_header_occurrence_wins() {
        let t = table(&["x", "dup", "dup"], &[&["0", "first", "second"]]);
        let idx = t.column_index(Dataset::Candidate, "dup").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(cell(&t.rows()[0], idx), "first");
    }

    #[test]
    fn unknown_column_is_matching_error() {
        let t = table(&["a"], &[&["1"]]);
        let err = t.column_index(Dataset::Reference, "zzz").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Matching);
        assert!(err.to_string().contains("reference: column 'zzz' not found"));
    }

    #[test]
    fn validate_names_all_missing_columns() {
        let t = table(&["a"], &[&["1"]]);
        let err = t.validate(Dataset::Candidate, &["a", "b", "c"]).unwrap_err();
        match err {
            ReconError::MissingColumns { columns, .. } => assert_eq!(columns, vec!["b", "c"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_rejects_zero_rows_and_empty_header() {
        let t = table(&["a"], &[]);
        assert!(matches!(
            t.validate(Dataset::Candidate, &["a"]),
            Err(ReconError::NoDataRows { .. })
        ));

        let t = table(&[], &[]);
        assert!(matches!(
            t.validate(Dataset::Reference, &[]),
            Err(ReconError::NoHeaders { .. })
        ));
    }

    #[test]
    fn missing_columns_reported_before_row_count() {
        let t = table(&["a"], &[]);
        assert!(matches!(
            t.validate(Dataset::Candidate, &["b"]),
            Err(ReconError::MissingColumns { .. })
        ));
    }
}
