//! Lexical state tags and the per-position track produced by the scanner.
//!
//! - [`LexicalState`] - Syntactic role of one position in command text
//! - [`StateTrack`] - One state per byte of the scanned text, plus queries

use std::ops::Range;

use serde::Serialize;

use crate::error::{AppResult, empty_state_set, position_out_of_range};

/// Syntactic role of a single position in SQL command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LexicalState {
    /// Plain SQL outside any quote, comment or marker
    #[default]
    None,
    /// Inside `'...'`
    SingleQuotedString,
    /// Inside `"..."`
    DoubleQuotedString,
    /// Inside `` `...` ``
    BacktickIdentifier,
    /// Inside a `-- ` comment
    LineCommentDash,
    /// Inside a `#` comment
    LineCommentHash,
    /// Inside `/* ... */`
    BlockComment,
    /// The `@` introducing a bind parameter
    ParameterMarker,
    /// The first `@` of an `@@name` session variable reference
    SessionVariableMarker,
    /// A `;` between statements
    StatementSeparator
}

impl LexicalState {
    /// One-character tag used when printing a state map under the SQL text.
    pub fn as_char(self) -> char {
        match self {
            Self::None => '.',
            Self::SingleQuotedString => '\'',
            Self::DoubleQuotedString => '"',
            Self::BacktickIdentifier => '`',
            Self::LineCommentDash => '-',
            Self::LineCommentHash => '#',
            Self::BlockComment => '/',
            Self::ParameterMarker => '@',
            Self::SessionVariableMarker => '$',
            Self::StatementSeparator => ';'
        }
    }

    /// Whether the state is one of the three quoted constructs.
    pub fn is_quoted(self) -> bool {
        matches!(
            self,
            Self::SingleQuotedString | Self::DoubleQuotedString | Self::BacktickIdentifier
        )
    }

    /// Whether the state is one of the three comment forms.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            Self::LineCommentDash | Self::LineCommentHash | Self::BlockComment
        )
    }
}

impl std::fmt::Display for LexicalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::SingleQuotedString => write!(f, "single-quoted string"),
            Self::DoubleQuotedString => write!(f, "double-quoted string"),
            Self::BacktickIdentifier => write!(f, "backtick identifier"),
            Self::LineCommentDash => write!(f, "dash line comment"),
            Self::LineCommentHash => write!(f, "hash line comment"),
            Self::BlockComment => write!(f, "block comment"),
            Self::ParameterMarker => write!(f, "parameter marker"),
            Self::SessionVariableMarker => write!(f, "session variable marker"),
            Self::StatementSeparator => write!(f, "statement separator")
        }
    }
}

/// Per-position lexical classification of a command text.
///
/// `track.len()` always equals the byte length of the scanned text, and
/// `track.get(i)` describes the byte at `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateTrack {
    states:       Vec<LexicalState>,
    unterminated: Option<LexicalState>
}

impl StateTrack {
    pub(crate) fn new(states: Vec<LexicalState>, unterminated: Option<LexicalState>) -> Self {
        Self {
            states,
            unterminated
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<LexicalState> {
        self.states.get(index).copied()
    }

    pub fn as_slice(&self) -> &[LexicalState] {
        &self.states
    }

    pub fn iter(&self) -> impl Iterator<Item = LexicalState> + '_ {
        self.states.iter().copied()
    }

    /// Quote or block comment still open when the input ended.
    ///
    /// A line comment running to the end of input is not reported.
    pub fn unterminated(&self) -> Option<LexicalState> {
        self.unterminated
    }

    /// Indices in `[start, start + length)` where a run of `state` begins.
    ///
    /// A `length` of zero, or one that runs past the end, means "to the end
    /// of the text".
    ///
    /// # Errors
    ///
    /// Returns an error when `start` is not a valid position.
    pub fn positions_of(
        &self,
        state: LexicalState,
        start: usize,
        length: usize
    ) -> AppResult<Vec<usize>> {
        let window = self.window(start, length)?;
        Ok(self.run_starts(window, |s| s == state))
    }

    /// Like [`positions_of`](Self::positions_of), for any state in `states`.
    ///
    /// Adjacent runs of two different requested states each yield a start.
    ///
    /// # Errors
    ///
    /// Returns an error when `states` is empty or `start` is not a valid
    /// position.
    pub fn positions_of_any(
        &self,
        states: &[LexicalState],
        start: usize,
        length: usize
    ) -> AppResult<Vec<usize>> {
        if states.is_empty() {
            return Err(empty_state_set());
        }
        let window = self.window(start, length)?;
        Ok(self.run_starts(window, |s| states.contains(&s)))
    }

    /// Every `@` tagged as a bind-parameter marker, in text order.
    pub fn parameter_markers(&self) -> Vec<usize> {
        self.run_starts(0..self.states.len(), |s| s == LexicalState::ParameterMarker)
    }

    /// Byte ranges of the statements between separators.
    ///
    /// Separators themselves are excluded. A trailing fragment after the last
    /// separator is included only when it is non-empty.
    pub fn statement_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut begin = 0;
        for (i, state) in self.states.iter().enumerate() {
            if *state == LexicalState::StatementSeparator {
                ranges.push(begin..i);
                begin = i + 1;
            }
        }
        if begin < self.states.len() {
            ranges.push(begin..self.states.len());
        }
        ranges
    }

    fn window(&self, start: usize, length: usize) -> AppResult<Range<usize>> {
        let len = self.states.len();
        if start >= len {
            return Err(position_out_of_range(start, len));
        }
        let end = match start.checked_add(length) {
            Some(end) if length > 0 && end <= len => end,
            _ => len
        };
        Ok(start..end)
    }

    fn run_starts(
        &self,
        window: Range<usize>,
        wanted: impl Fn(LexicalState) -> bool
    ) -> Vec<usize> {
        let offset = window.start;
        let mut previous = None;
        let mut starts = Vec::new();
        for (i, &current) in self.states[window].iter().enumerate() {
            if previous != Some(current) && wanted(current) {
                starts.push(offset + i);
            }
            previous = Some(current);
        }
        starts
    }
}
