//! Best-effort SQL auto-format
//!
//! Intentionally shallow: no keyword casing, no line breaking. The output is
//! a fixed point, so formatting twice never changes the text further.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static COMMA_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("Invalid comma regex"));

/// Trim, collapse whitespace runs to one space and normalize commas to `", "`.
pub fn format_sql(sql: &str) -> String {
    let trimmed = sql.trim();
    let collapsed = WHITESPACE_RUN.replace_all(trimmed, " ");
    COMMA_SPACING.replace_all(&collapsed, ", ").into_owned()
}

/// True when the draft has nothing worth sending
pub fn is_blank(sql: &str) -> bool {
    sql.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(
            format_sql("  SELECT   *\n\tFROM  title_basics  "),
            "SELECT * FROM title_basics"
        );
    }

    #[test]
    fn test_normalizes_comma_spacing() {
        assert_eq!(
            format_sql("SELECT a ,b,   c FROM t"),
            "SELECT a, b, c FROM t"
        );
        assert_eq!(format_sql("SELECT a\n,\nb FROM t"), "SELECT a, b FROM t");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(format_sql(""), "");
        assert_eq!(format_sql(" \n\t "), "");
        assert!(is_blank(" \n\t "));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_format_is_idempotent() {
        let corpus = [
            "",
            "   ",
            "SELECT * FROM title_basics;",
            "select a ,b , c from t where x = 1",
            "a,",
            ",a",
            " , , ",
            "SELECT\n\n  tconst,\r\n primaryTitle\tFROM   title_basics\nLIMIT 10",
            "SELECT 'a,  b' , count(*) FROM t GROUP BY 1",
            "x\u{00a0},\u{2003}y",
        ];
        for input in corpus {
            let once = format_sql(input);
            let twice = format_sql(&once);
            assert_eq!(once, twice, "format is not idempotent for {input:?}");
        }
    }
}
