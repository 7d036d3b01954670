// JSON export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use addrsync_recon::{ReconError, ReconResult};

/// Write the full run result (meta, summary, every match result, corrections) as pretty JSON.
pub fn export(result: &ReconResult, path: &Path) -> Result<(), ReconError> {
    let file = File::create(path)
        .map_err(|e| ReconError::Export(format!("cannot create {}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)
        .map_err(|e| ReconError::Export(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| ReconError::Export(format!("cannot write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrsync_recon::{ParsedTable, ReconConfig};
    use std::fs;
    use tempfile::tempdir;

    fn table(headers: &[&str], rows: &[&[&str]]) -> ParsedTable {
        ParsedTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn sample_result() -> ReconResult {
        let candidate = table(
            &["管理コメント", "都道府県市区町村", "番地", "郵便番号"],
            &[&["id/1", "東京都新宿区", "1-2-3", ""]],
        );
        let reference = table(
            &["求人コード", "勤務地(郵便番号)", "勤務地(都道府県)", "勤務地(市区町村)", "勤務地(番地、ビル名)"],
            &[&["[1]", "160-0022", "東京都", "新宿区", ""]],
        );
        addrsync_recon::run(&ReconConfig::default(), &candidate, &reference).unwrap()
    }

    #[test]
    fn test_json_export() {
        let result = sample_result();

        let dir = tempdir().unwrap();
        let path = dir.path().join("result.json");
        export(&result, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["meta"]["config_name"], "address-recon");
        assert_eq!(parsed["summary"]["matched"], 1);
        assert_eq!(parsed["results"][0]["identifier"], "[1]");
        assert_eq!(parsed["results"][0]["is_match"], true);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_json_export_reports_write_failure() {
        // /dev/full accepts open() but fails every write with ENOSPC
        let err = export(&sample_result(), Path::new("/dev/full")).unwrap_err();
        assert_eq!(err.kind(), addrsync_recon::ErrorKind::Export);
        assert!(err.to_string().contains("/dev/full"), "{err}");
    }
}
