//! Join-key derivation from the candidate's free-text comment.

/// Derive the bracketed job identifier from a management comment.
///
/// Everything after the first `/` becomes the identifier, verbatim, wrapped in
/// `[` `]`. Returns `""` when the comment has no `/`; callers treat that as
/// "no identifier, skip the row".
///
/// ```
/// use addrsync_recon::identifier::extract_identifier;
///
/// let comment = "派遣先企業:株式会社宮島,拠点コード:1032,求人ID/251125380015";
/// assert_eq!(extract_identifier(comment), "[251125380015]");
/// assert_eq!(extract_identifier("no-slash-here"), "");
/// ```
pub fn extract_identifier(comment: &str) -> String {
    match comment.split_once('/') {
        Some((_, rest)) => format!("[{rest}]"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_text_after_first_slash() {
        assert_eq!(extract_identifier("a/b/c"), "[b/c]");
        assert_eq!(extract_identifier("dept:x,code:1,id/999"), "[999]");
    }

    #[test]
    fn no_slash_or_empty_yields_empty() {
        assert_eq!(extract_identifier("no-slash-here"), "");
        assert_eq!(extract_identifier(""), "");
    }

    #[test]
    fn no_trimming_or_validation() {
        assert_eq!(extract_identifier("id/ 12 "), "[ 12 ]");
        assert_eq!(extract_identifier("trailing/"), "[]");
        assert_eq!(extract_identifier("/lead"), "[lead]");
    }

    #[test]
    fn full_width_slash_is_not_a_separator() {
        assert_eq!(extract_identifier("求人ID／123"), "");
    }
}
