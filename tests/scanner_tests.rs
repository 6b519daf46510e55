// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_literal_inliner::scanner::{LexicalState, scan, split_statements};

fn map(text: &str) -> String {
    scan(text).iter().map(LexicalState::as_char).collect()
}

#[test]
fn test_length_matches_text() {
    for text in [
        "",
        "SELECT 1",
        "SELECT 'abc",
        "/* open",
        "SELECT 'ü', `ß`, @p -- ✓\n;"
    ] {
        assert_eq!(scan(text).len(), text.len(), "{:?}", text);
    }
}

#[test]
fn test_doubled_quotes_stay_inside_string() {
    let text = "'O''Brien''s'";
    let track = scan(text);
    for i in 0..text.len() - 1 {
        assert_eq!(
            track.get(i),
            Some(LexicalState::SingleQuotedString),
            "position {}",
            i
        );
    }
    assert_eq!(track.get(text.len() - 1), Some(LexicalState::None));
    assert_eq!(track.unterminated(), None);
}

#[test]
fn test_dash_without_space_is_not_comment() {
    let track = scan("SELECT 1--2");
    assert!(track.iter().all(|s| s != LexicalState::LineCommentDash));
}

#[test]
fn test_dash_with_space_comments_to_line_end() {
    let text = "SELECT 1 -- 2\nSELECT 3";
    let track = scan(text);
    let dash = text.find('-').unwrap();
    let newline = text.find('\n').unwrap();
    for i in dash..newline {
        assert_eq!(track.get(i), Some(LexicalState::LineCommentDash));
    }
    assert!(track.as_slice()[newline..]
        .iter()
        .all(|s| *s == LexicalState::None));
}

#[test]
fn test_separators_outside_strings_only() {
    let text = "SELECT ';'; SELECT 2;";
    let separators = scan(text)
        .positions_of(LexicalState::StatementSeparator, 0, 0)
        .unwrap();
    assert_eq!(separators, vec![10, 20]);
}

#[test]
fn test_parameter_and_session_markers() {
    assert_eq!(map("@foo"), "@...");
    assert_eq!(map("@@foo"), "$....");
    assert_eq!(map("SELECT @@version, @id"), ".......$..........@..");
}

#[test]
fn test_markers_in_comments_ignored() {
    let text = "SELECT 1 /* @a */ # @b\n-- @c\n, @d";
    let track = scan(text);
    assert_eq!(track.parameter_markers(), vec![text.rfind('@').unwrap()]);
}

#[test]
fn test_positions_of_any_quoted_states() {
    let text = "SELECT 'a', \"b\", `c`";
    let starts = scan(text)
        .positions_of_any(
            &[
                LexicalState::SingleQuotedString,
                LexicalState::DoubleQuotedString,
                LexicalState::BacktickIdentifier
            ],
            0,
            0
        )
        .unwrap();
    assert_eq!(starts, vec![7, 12, 17]);
}

#[test]
fn test_positions_of_window() {
    let text = "@a @b @c @d";
    let track = scan(text);
    assert_eq!(
        track
            .positions_of(LexicalState::ParameterMarker, 3, 6)
            .unwrap(),
        vec![3, 6]
    );
    assert!(track
        .positions_of(LexicalState::ParameterMarker, 100, 0)
        .is_err());
}

#[test]
fn test_unterminated_reported_not_raised() {
    let track = scan("SELECT \"abc; DROP TABLE t");
    assert_eq!(track.unterminated(), Some(LexicalState::DoubleQuotedString));
    assert!(track
        .positions_of(LexicalState::StatementSeparator, 0, 0)
        .unwrap()
        .is_empty());
}

#[test]
fn test_split_script() {
    let script = "INSERT INTO t VALUES ('a;b');\n# comment; here\nSELECT `x;y` FROM t;\n";
    assert_eq!(
        split_statements(script),
        vec![
            "INSERT INTO t VALUES ('a;b')",
            "# comment; here\nSELECT `x;y` FROM t"
        ]
    );
}

#[test]
fn test_state_display_and_tags() {
    assert_eq!(LexicalState::default(), LexicalState::None);
    assert_eq!(LexicalState::BlockComment.to_string(), "block comment");
    assert_eq!(LexicalState::SessionVariableMarker.as_char(), '$');
    assert!(LexicalState::BacktickIdentifier.is_quoted());
    assert!(LexicalState::LineCommentHash.is_comment());
    assert!(!LexicalState::ParameterMarker.is_comment());
}
