//! Address canonicalization used only for comparison.

/// Kana written interchangeably with `ヶ` in place names (`ケ`, half-width `ｹ`).
const KE_VARIANTS: [char; 2] = ['ケ', 'ｹ'];

const SMALL_KE: char = 'ヶ';

/// Zero-width no-break space; Excel leaves it behind in pasted cells.
const BOM: char = '\u{FEFF}';

/// Canonicalize an address for prefix comparison.
///
/// Folds the `ケ` variants onto `ヶ`, then drops every whitespace character
/// (full-width space U+3000 included) and any stray U+FEFF. Idempotent.
pub fn normalize_address(address: &str) -> String {
    address
        .chars()
        .filter(|c| !c.is_whitespace() && *c != BOM)
        .map(|c| if KE_VARIANTS.contains(&c) { SMALL_KE } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_ke_and_strips_spaces() {
        assert_eq!(normalize_address("霞ケ関　1丁目 2"), "霞ヶ関1丁目2");
        assert_eq!(normalize_address("霞ｹ関\u{3000}１丁目"), "霞ヶ関１丁目");
        assert_eq!(normalize_address("自由が丘\t3-1\n"), "自由が丘3-1");
        assert_eq!(normalize_address("東京都\u{FEFF}新宿区"), "東京都新宿区");
        assert_eq!(normalize_address("\u{FEFF}霞ケ関"), "霞ヶ関");
    }

    #[test]
    fn leaves_other_text_alone() {
        assert_eq!(normalize_address("東京都新宿区1-2-3"), "東京都新宿区1-2-3");
        assert_eq!(normalize_address(""), "");
    }

    #[test]
    fn idempotent() {
        for s in ["", "  ", "霞ケ関 ｹ", "東京都　千代田区 霞ヶ関", "ａｂｃ d\u{3000}e"] {
            let once = normalize_address(s);
            assert_eq!(normalize_address(&once), once, "input: {s:?}");
        }
    }
}
