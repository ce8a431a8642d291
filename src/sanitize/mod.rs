//! Free-text cleanup applied to every stored caller-supplied field.

/// Trim outer whitespace and neutralize angle brackets.
///
/// Only `<` and `>` are escaped; quotes and attributes are left alone,
/// so this is not a substitute for output-context-aware escaping.
pub fn clean_text(input: &str) -> String {
    input.trim().replace('<', "&lt;").replace('>', "&gt;")
}

/// Clean an optional field, mapping missing to an empty string.
pub fn clean_opt(input: Option<&str>) -> String {
    clean_text(input.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_outer_whitespace() {
        assert_eq!(clean_text("  Mia \n"), "Mia");
    }

    #[test]
    fn test_escapes_angle_brackets() {
        assert_eq!(
            clean_text("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_leaves_quotes_untouched() {
        assert_eq!(clean_text(r#"a "quoted" name"#), r#"a "quoted" name"#);
    }

    #[test]
    fn test_clean_opt_missing_is_empty() {
        assert_eq!(clean_opt(None), "");
        assert_eq!(clean_opt(Some(" x ")), "x");
    }
}
