//! Detection of bind parameters used as `LIMIT`/`OFFSET` operands.
//!
//! MySQL cannot bind a parameter in these positions on every driver path, so
//! the inliner substitutes literals there. Recognised shapes:
//!
//! ```sql
//! LIMIT row_count
//! LIMIT offset, row_count
//! LIMIT row_count OFFSET offset
//! ```
//!
//! Each operand is either an integer or an `@name` reference; only the
//! references are reported. A clause counts only when its `LIMIT` keyword
//! sits in plain SQL, outside strings and comments.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;
use smallvec::SmallVec;

use crate::scanner::{LexicalState, StateTrack};

/// Byte spans of `@name` tokens, usually just one or two per command
pub type SpanVec = SmallVec<[Range<usize>; 4]>;

/// Regex for one `LIMIT` clause; each capture group is one operand.
static LIMIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\bLIMIT\s+(?:(@[A-Za-z0-9_$]+|\d+)\s*,\s*)?",
        r"(@[A-Za-z0-9_$]+|\d+)",
        r"(?:\s+OFFSET\s+(@[A-Za-z0-9_$]+|\d+))?"
    ))
    .expect("valid regex")
});

/// Spans of every parameter reference in a `LIMIT` or `OFFSET` slot.
///
/// `track` must be the scan of `sql`. Matches whose keyword is inside a
/// string or comment are skipped; callers must still check that each span
/// starts at a real parameter marker.
pub fn parameter_spans(sql: &str, track: &StateTrack) -> SpanVec {
    LIMIT_REGEX
        .captures_iter(sql)
        .filter(|cap| {
            cap.get(0)
                .is_some_and(|clause| track.get(clause.start()) == Some(LexicalState::None))
        })
        .flat_map(|cap| [cap.get(1), cap.get(2), cap.get(3)])
        .flatten()
        .filter(|operand| operand.as_str().starts_with('@'))
        .map(|operand| operand.range())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    fn spans(sql: &str) -> SpanVec {
        parameter_spans(sql, &scan(sql))
    }

    fn operands(sql: &str) -> Vec<&str> {
        spans(sql)
            .into_iter()
            .map(|span| &sql[span])
            .collect()
    }

    #[test]
    fn test_row_count_only() {
        assert_eq!(operands("SELECT * FROM t LIMIT @p0"), vec!["@p0"]);
    }

    #[test]
    fn test_offset_comma_row_count() {
        assert_eq!(operands("SELECT 1 LIMIT @o , @c"), vec!["@o", "@c"]);
        assert_eq!(operands("SELECT 1 LIMIT 10,@c"), vec!["@c"]);
    }

    #[test]
    fn test_offset_keyword() {
        assert_eq!(operands("SELECT 1 LIMIT @c OFFSET @o"), vec!["@c", "@o"]);
        assert_eq!(operands("SELECT 1 limit 5 offset @o"), vec!["@o"]);
    }

    #[test]
    fn test_literal_limits_yield_nothing() {
        assert!(spans("SELECT 1 LIMIT 10 OFFSET 20").is_empty());
    }

    #[test]
    fn test_malformed_clause_yields_nothing() {
        assert!(spans("SELECT 1 LIMIT").is_empty());
        assert!(spans("SELECT 1 LIMIT (@p0)").is_empty());
        assert!(spans("SELECT 1 NOLIMIT @p0").is_empty());
    }

    #[test]
    fn test_multiple_clauses() {
        let sql = "(SELECT 1 LIMIT @a) UNION (SELECT 2 LIMIT @b)";
        assert_eq!(operands(sql), vec!["@a", "@b"]);
    }

    #[test]
    fn test_keyword_in_comment_or_string_skipped() {
        assert!(spans("SELECT 1 -- LIMIT\n@p0").is_empty());
        assert!(spans("SELECT 1 # LIMIT\n@p0").is_empty());
        assert!(spans("SELECT 1 /* LIMIT */ @p0").is_empty());
        assert!(spans("SELECT 'LIMIT @p0'").is_empty());
    }
}
