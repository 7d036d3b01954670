// CSV/TSV import and correction-file export

use std::io::Read;
use std::path::Path;

use addrsync_recon::{CorrectionTable, ParsedTable, ReconError};
use tracing::debug;

/// Prepended to exported files so Excel opens them as UTF-8.
pub const UTF8_BOM: &str = "\u{FEFF}";

pub fn import(path: &Path) -> Result<ParsedTable, ReconError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    let delim = delimiter as char;
    debug!(path = %path.display(), delimiter = ?delim, "sniffed delimiter");
    import_from_str(&path.display().to_string(), &content, delimiter)
}

/// Guess the delimiter from the first ten lines.
///
/// Tab, semicolon, comma and pipe are tried in turn. A delimiter that splits
/// the header into a single field is never chosen; comma is the fallback.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Header must split
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Header width times the number of sampled lines that agree with it
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed.
///
/// A leading BOM is dropped. Non-UTF-8 input is decoded as Shift_JIS, the
/// usual encoding of CSVs exported by Japanese Excel.
pub fn read_file_as_utf8(path: &Path) -> Result<String, ReconError> {
    let source = path.display().to_string();
    let mut file = std::fs::File::open(path)
        .map_err(|e| ReconError::parse(&source, format!("cannot open file: {e}")))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ReconError::parse(&source, format!("cannot read file: {e}")))?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::SHIFT_JIS.decode(&bytes);
            if had_errors {
                debug!(path = %source, "input is neither UTF-8 nor clean Shift_JIS");
            }
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Parse delimited text. The first record is the header row; fully blank
/// rows are dropped. Fails when the input has no records at all.
pub fn import_from_str(
    source_name: &str,
    content: &str,
    delimiter: u8,
) -> Result<ParsedTable, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| ReconError::parse(source_name, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect(),
        None => return Err(ReconError::parse(source_name, "file contains no data")),
    };

    let mut rows = Vec::new();
    for result in records {
        let record = result.map_err(|e| ReconError::parse(source_name, e.to_string()))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ParsedTable::new(headers, rows))
}

/// Render records as comma-separated text, one record per line.
///
/// Fields containing a comma, quote, or line break are quoted with interior
/// quotes doubled; all others are written bare.
pub fn render_csv<'a, I>(records: I) -> Result<String, ReconError>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    for record in records {
        writer
            .write_record(record)
            .map_err(|e| ReconError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReconError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReconError::Export(e.to_string()))
}

/// Write rendered CSV with a UTF-8 BOM.
pub fn write_with_bom(path: &Path, rendered: &str) -> Result<(), ReconError> {
    let mut out = String::with_capacity(UTF8_BOM.len() + rendered.len());
    out.push_str(UTF8_BOM);
    out.push_str(rendered);
    std::fs::write(path, out)
        .map_err(|e| ReconError::Export(format!("cannot write {}: {e}", path.display())))
}

pub fn export(table: &CorrectionTable, path: &Path) -> Result<(), ReconError> {
    let rendered = render_csv(table.records())?;
    write_with_bom(path, &rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "Name;Age;City\nAlice;30;Paris\nBob;25;London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "管理コメント,都道府県市区町村,番地\nid/1,東京都新宿区,1-2-3\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "求人コード\t勤務地(都道府県)\n[1]\t東京都\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_comma_with_quoted_comma_in_header() {
        // Header text itself contains a comma inside quotes
        let content = "求人コード,\"勤務地(番地、ビル名)\",\"a,b\"\n[1],1-1,x\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_import_header_and_rows() {
        let table =
            import_from_str("t", "a,b,c\n1,2,3\n\n,,\n4,5\n", b',').unwrap();
        assert_eq!(table.headers(), strings(&["a", "b", "c"]).as_slice());
        // blank line and all-empty row dropped, short row kept as-is
        assert_eq!(table.rows(), &[strings(&["1", "2", "3"]), strings(&["4", "5"])]);
    }

    #[test]
    fn test_import_empty_is_parse_error() {
        let err = import_from_str("empty.csv", "", b',').unwrap_err();
        assert_eq!(err.kind(), addrsync_recon::ErrorKind::Parsing);
        assert!(err.to_string().contains("empty.csv"));
    }

    #[test]
    fn test_header_only_file_has_zero_rows() {
        let table = import_from_str("t", "a,b\n", b',').unwrap();
        assert_eq!(table.headers().len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_bom_stripped_on_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        fs::write(&path, "\u{FEFF}求人コード,企業名\n[1],宮島\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.headers()[0], "求人コード");
        assert!(table.has_column("求人コード"));
    }

    #[test]
    fn test_shift_jis_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sjis.csv");
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("番地,郵便番号\n1-2-3,160-0022\n");
        fs::write(&path, &bytes).unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.headers(), strings(&["番地", "郵便番号"]).as_slice());
        assert_eq!(table.rows()[0], strings(&["1-2-3", "160-0022"]));
    }

    #[test]
    fn test_render_quotes_only_when_needed() {
        let records = [
            strings(&["plain", "a,b", "say \"hi\""]),
            strings(&["line\nbreak", "", "東京都"]),
        ];
        let rendered = render_csv(records.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(
            rendered,
            "plain,\"a,b\",\"say \"\"hi\"\"\"\n\"line\nbreak\",,東京都\n"
        );
    }

    #[test]
    fn test_export_writes_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = CorrectionTable {
            headers: strings(&["操作コード", "郵便番号"]),
            rows: vec![strings(&["02", "1600022"])],
        };
        export(&table, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
        let content = String::from_utf8(bytes).unwrap();
        assert_eq!(content, "\u{FEFF}操作コード,郵便番号\n02,1600022\n");

        // Reads back through the same import path
        let table = import(&path).unwrap();
        assert_eq!(table.headers()[0], "操作コード");
        assert_eq!(table.rows()[0][1], "1600022");
    }
}
