//! Character-level lexical scanner for MySQL command text.
//!
//! The scanner walks the text once, left to right, and tags every byte with
//! the [`LexicalState`] it belongs to. Consumers use the resulting
//! [`StateTrack`] to find bind-parameter markers and statement separators
//! that are real SQL syntax rather than content of a string or comment.
//!
//! # Recognised Constructs
//!
//! | Construct | Rule |
//! |-----------|------|
//! | `'...'`, `"..."`, `` `...` `` | Doubled quote is an escaped quote, not a close |
//! | `/* ... */` | `/` must be followed by `*`, otherwise it is division |
//! | `# ...` | Runs to end of line |
//! | `-- ...` | Only when the second dash is followed by a space or tab |
//! | `@name` | Only the `@` is tagged |
//! | `@@name` | First `@` tagged as session variable, second left untagged |
//! | `;` | Statement separator outside quotes and comments |
//!
//! The scanner never fails. Closing characters are found one position late,
//! so the closing quote of a string and the closing `/` of a block comment
//! are left as [`LexicalState::None`]. A quote or block comment that is still
//! open at the end of input is reported by [`StateTrack::unterminated`].
//!
//! # Example
//!
//! ```
//! use sql_literal_inliner::scanner::{LexicalState, scan};
//!
//! let track = scan("SELECT '@x' FROM t WHERE id = @id");
//!
//! assert_eq!(track.len(), 33);
//! assert_eq!(track.parameter_markers(), vec![30]);
//! assert_eq!(track.get(8), Some(LexicalState::SingleQuotedString));
//! ```

mod types;

use tracing::debug;
pub use types::{LexicalState, StateTrack};

/// Running state of the scan, carried from one byte to the next.
#[derive(Debug, Clone, Copy, Default)]
struct ScanCursor {
    state:               LexicalState,
    last_char:           Option<u8>,
    second_to_last_char: Option<u8>
}

/// Classify every byte of `text`.
pub fn scan(text: &str) -> StateTrack {
    let bytes = text.as_bytes();
    let mut states = vec![LexicalState::None; bytes.len()];
    let cursor = bytes
        .iter()
        .enumerate()
        .fold(ScanCursor::default(), |cursor, (i, &c)| {
            cursor.step(i, c, &mut states)
        })
        .finish(&mut states);
    let unterminated = cursor.unterminated();
    if let Some(state) = unterminated {
        debug!(%state, length = bytes.len(), "input ended inside an open construct");
    }
    StateTrack::new(states, unterminated)
}

/// Split `text` into its non-blank statements.
///
/// Separators inside strings and comments do not split.
pub fn split_statements(text: &str) -> Vec<&str> {
    scan(text)
        .statement_ranges()
        .into_iter()
        .map(|range| text[range].trim())
        .filter(|statement| !statement.is_empty())
        .collect()
}

impl ScanCursor {
    fn step(mut self, i: usize, c: u8, states: &mut [LexicalState]) -> Self {
        let consumed = match self.state {
            LexicalState::SingleQuotedString => self.quoted(b'\'', i, c, states),
            LexicalState::DoubleQuotedString => self.quoted(b'"', i, c, states),
            LexicalState::BacktickIdentifier => self.quoted(b'`', i, c, states),
            LexicalState::BlockComment => self.block_comment(i, c, states),
            LexicalState::LineCommentDash => self.dash_comment(i, c, states),
            LexicalState::LineCommentHash => is_line_end(c) && self.close(),
            LexicalState::ParameterMarker => {
                if c == b'@' {
                    states[i - 1] = LexicalState::SessionVariableMarker;
                }
                self.close()
            }
            _ => false
        };

        if self.state == LexicalState::None && !consumed {
            self.enter(i, c, states);
        }
        if self.state != LexicalState::None {
            states[i] = self.state;
        }
        self
    }

    fn enter(&mut self, i: usize, c: u8, states: &mut [LexicalState]) {
        match c {
            b'\'' => self.state = LexicalState::SingleQuotedString,
            b'"' => self.state = LexicalState::DoubleQuotedString,
            b'`' => self.state = LexicalState::BacktickIdentifier,
            b'/' => {
                self.state = LexicalState::BlockComment;
                self.last_char = Some(b'/');
            }
            b'-' => {
                self.state = LexicalState::LineCommentDash;
                self.last_char = Some(b'-');
            }
            b'#' => self.state = LexicalState::LineCommentHash,
            b'@' => self.state = LexicalState::ParameterMarker,
            b';' => states[i] = LexicalState::StatementSeparator,
            _ => {}
        }
    }

    fn quoted(&mut self, quote: u8, i: usize, c: u8, states: &mut [LexicalState]) -> bool {
        if c == quote {
            self.last_char = if self.last_char == Some(quote) {
                None
            } else {
                Some(quote)
            };
        } else if self.last_char == Some(quote) {
            // The previous quote was not doubled, so it closed the string.
            self.reset();
            states[i - 1] = LexicalState::None;
        }
        false
    }

    fn block_comment(&mut self, i: usize, c: u8, states: &mut [LexicalState]) -> bool {
        match self.last_char {
            Some(b'/') => {
                self.last_char = None;
                if c != b'*' {
                    self.reset();
                    states[i - 1] = LexicalState::None;
                }
                false
            }
            Some(b'*') if c == b'/' => self.close(),
            _ => {
                self.last_char = (c == b'*').then_some(b'*');
                false
            }
        }
    }

    fn dash_comment(&mut self, i: usize, c: u8, states: &mut [LexicalState]) -> bool {
        if self.last_char != Some(b'-') {
            return is_line_end(c) && self.close();
        }
        match self.second_to_last_char {
            None if c == b'-' => self.second_to_last_char = Some(b'-'),
            Some(b'-') if c == b' ' || c == b'\t' => {
                self.last_char = None;
                self.second_to_last_char = None;
            }
            _ => {
                // "--" must be followed by whitespace; otherwise these are
                // minus signs and get reclassified.
                states[i - 1] = LexicalState::None;
                if self.second_to_last_char == Some(b'-') {
                    states[i - 2] = LexicalState::None;
                }
                self.reset();
            }
        }
        false
    }

    /// Clear the provisional introducer or closer left pending at end of input.
    fn finish(mut self, states: &mut [LexicalState]) -> Self {
        let Some(last) = states.len().checked_sub(1) else {
            return self;
        };
        let pending = match self.state {
            LexicalState::SingleQuotedString => self.last_char == Some(b'\''),
            LexicalState::DoubleQuotedString => self.last_char == Some(b'"'),
            LexicalState::BacktickIdentifier => self.last_char == Some(b'`'),
            LexicalState::BlockComment => self.last_char == Some(b'/'),
            LexicalState::LineCommentDash => self.last_char == Some(b'-'),
            _ => false
        };
        if pending {
            states[last] = LexicalState::None;
            if self.second_to_last_char == Some(b'-') {
                states[last - 1] = LexicalState::None;
            }
            self.reset();
        }
        self
    }

    fn unterminated(&self) -> Option<LexicalState> {
        (self.state.is_quoted() || self.state == LexicalState::BlockComment).then_some(self.state)
    }

    fn close(&mut self) -> bool {
        self.reset();
        true
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn is_line_end(c: u8) -> bool {
    c == b'\r' || c == b'\n'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(text: &str) -> String {
        scan(text).iter().map(LexicalState::as_char).collect()
    }

    #[test]
    fn test_empty_text() {
        let track = scan("");
        assert!(track.is_empty());
        assert_eq!(track.unterminated(), None);
    }

    #[test]
    fn test_plain_sql_is_none() {
        assert_eq!(map("SELECT 1"), "........");
    }

    #[test]
    fn test_single_quoted_string_close_is_retroactive() {
        assert_eq!(map("'a' 'b'"), "''..''.");
    }

    #[test]
    fn test_doubled_quote_stays_inside() {
        assert_eq!(map("'a''b' x"), "'''''...");
    }

    #[test]
    fn test_double_quotes_and_backticks() {
        assert_eq!(map("\"a\"\"b\" x"), "\"\"\"\"\"...");
        assert_eq!(map("`a``b` x"), "`````...");
    }

    #[test]
    fn test_other_quotes_inside_string_ignored() {
        assert_eq!(map("'a\"b`c' x"), "''''''...");
    }

    #[test]
    fn test_block_comment() {
        assert_eq!(map("a/*b*/c"), ".////..");
    }

    #[test]
    fn test_block_comment_closes_after_repeated_stars() {
        assert_eq!(map("/* a **/;"), "///////.;");
    }

    #[test]
    fn test_division_is_not_comment() {
        assert_eq!(map("a/b;"), "...;");
        assert_eq!(map("a/'x' "), "..''..");
    }

    #[test]
    fn test_trailing_slash_is_cleared() {
        assert_eq!(map("a/"), "..");
        assert_eq!(scan("a/").unterminated(), None);
    }

    #[test]
    fn test_hash_comment_runs_to_line_end() {
        assert_eq!(map("# x;\ny;"), "####..;");
    }

    #[test]
    fn test_dash_comment_needs_whitespace() {
        assert_eq!(map("1--2"), "....");
        assert_eq!(map("1 -- 2;\n3"), "..-----..");
        assert_eq!(map("1 --\t2"), "..----");
    }

    #[test]
    fn test_single_minus_is_operator() {
        assert_eq!(map("a-b;"), "...;");
    }

    #[test]
    fn test_triple_dash_restarts() {
        assert_eq!(map("---"), "...");
        assert_eq!(map("--- x"), ".....");
    }

    #[test]
    fn test_trailing_dashes_are_cleared() {
        assert_eq!(map("a--"), "...");
        assert_eq!(map("a-"), "..");
    }

    #[test]
    fn test_parameter_marker_only_tags_at_sign() {
        assert_eq!(map("@foo"), "@...");
        assert_eq!(map("x=@p0;"), "..@..;");
    }

    #[test]
    fn test_session_variable_marker() {
        assert_eq!(map("@@foo"), "$....");
    }

    #[test]
    fn test_marker_inside_string_is_string() {
        assert_eq!(map("'@p'"), "'''.");
        assert!(scan("'@p'").parameter_markers().is_empty());
    }

    #[test]
    fn test_separator_outside_string() {
        assert_eq!(map("SELECT ';'; SELECT 2;"), ".......''.;.........;");
    }

    #[test]
    fn test_unterminated_constructs() {
        assert_eq!(
            scan("SELECT 'abc").unterminated(),
            Some(LexicalState::SingleQuotedString)
        );
        assert_eq!(
            scan("SELECT /* x").unterminated(),
            Some(LexicalState::BlockComment)
        );
        assert_eq!(scan("SELECT 1 # x").unterminated(), None);
        assert_eq!(scan("SELECT 'abc'").unterminated(), None);
    }

    #[test]
    fn test_unterminated_string_keeps_rest_inside() {
        assert_eq!(map("x 'a;b"), "..''''");
    }

    #[test]
    fn test_multibyte_text_is_byte_indexed() {
        let text = "SELECT 'é', @p";
        let track = scan(text);
        assert_eq!(track.len(), text.len());
        assert_eq!(track.parameter_markers(), vec![text.len() - 2]);
    }

    #[test]
    fn test_split_statements() {
        let statements = split_statements("SELECT ';'; SELECT 2; -- done; \n ");
        assert_eq!(statements, vec!["SELECT ';'", "SELECT 2", "-- done;"]);
    }
}
