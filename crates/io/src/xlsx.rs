// Excel/ODS ingestion and XLSX correction export

use std::path::Path;

use addrsync_recon::{CorrectionTable, ParsedTable, ReconError};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use tracing::debug;

/// Sheet name the bulk-update import expects.
pub const EXPORT_SHEET_NAME: &str = "DATA";

/// Import the first sheet of a workbook (xlsx, xlsm, xlsb, xls, ods).
///
/// Every cell is read as text. Row 1 is the header row; rows whose cells
/// are all empty are dropped.
pub fn import(path: &Path) -> Result<ParsedTable, ReconError> {
    let source = path.display().to_string();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReconError::parse(&source, format!("failed to open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReconError::parse(&source, "workbook contains no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReconError::parse(&source, format!("failed to read sheet '{sheet_name}': {e}")))?;

    let (height, width) = range.get_size();
    debug!(path = %source, sheet = %sheet_name, height, width, "reading first sheet");

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    let headers = rows
        .next()
        .ok_or_else(|| ReconError::parse(&source, "sheet contains no data"))?;

    let rows: Vec<Vec<String>> = rows
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();

    Ok(ParsedTable::new(headers, rows))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Integers without decimals; postal codes and IDs often arrive as floats
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::Error(e) => format!("#{:?}", e),
        // Date serial as text
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Write the correction table to a single sheet named `DATA`, all cells as text.
pub fn export(table: &CorrectionTable, path: &Path) -> Result<(), ReconError> {
    let mut xlsx_workbook = XlsxWorkbook::new();

    let worksheet = xlsx_workbook
        .add_worksheet()
        .set_name(EXPORT_SHEET_NAME)
        .map_err(|e| ReconError::Export(format!("failed to create sheet: {e}")))?;

    for (row_idx, record) in table.records().enumerate() {
        let row = u32::try_from(row_idx)
            .map_err(|_| ReconError::Export(format!("row {row_idx} exceeds sheet limits")))?;
        for (col_idx, value) in record.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let col = u16::try_from(col_idx)
                .map_err(|_| ReconError::Export(format!("column {col_idx} exceeds sheet limits")))?;
            worksheet
                .write_string(row, col, value)
                .map_err(|e| ReconError::Export(format!("failed to write cell: {e}")))?;
        }
    }

    xlsx_workbook
        .save(path)
        .map_err(|e| ReconError::Export(format!("failed to save XLSX file: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cell_text_formatting() {
        assert_eq!(cell_text(&Data::Float(1600022.0)), "1600022");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("東京都".into())), "東京都");
    }

    #[test]
    fn test_export_then_import() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corrections.xlsx");

        let table = CorrectionTable {
            headers: strings(&["操作コード", "郵便番号", "都道府県市区町村", "番地", "管理コメント"]),
            rows: vec![strings(&["02", "1600022", "東京都新宿区", "", "a,b/999"])],
        };
        export(&table, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 100);

        let workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![EXPORT_SHEET_NAME.to_string()]);

        let imported = import(&path).unwrap();
        assert_eq!(imported.headers(), table.headers.as_slice());
        assert_eq!(imported.rows()[0][0], "02");
        // Stored as text, so no leading-zero or numeric coercion
        assert_eq!(imported.rows()[0][1], "1600022");
        assert_eq!(imported.rows()[0][2], "東京都新宿区");
        assert_eq!(imported.rows()[0][4], "a,b/999");
    }

    #[test]
    fn test_import_missing_file_is_parse_error() {
        let err = import(Path::new("/nonexistent/reference.xlsx")).unwrap_err();
        assert_eq!(err.kind(), addrsync_recon::ErrorKind::Parsing);
    }
}
