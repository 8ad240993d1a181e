//! Mutable state owned by a single parse.

use crate::types::{MediaType, MetaInfo};

/// What the previous classified token turned out to be.
///
/// Several stages look at this to decide how to read a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    #[default]
    None,
    NativeTitle,
    RomanTitle,
    /// 第 / 季 / 集 and similar unit words.
    UnitWord,
    /// The literal word `SEASON`, waiting for its number.
    SeasonKeyword,
    Season,
    /// The literal word `EPISODE`, waiting for its number.
    EpisodeKeyword,
    Episode,
    Year,
    Resolution,
    Part,
    Source,
    Effect,
    VideoCodec,
    AudioCodec,
}

/// Per-token control result of a classification stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The stage did not recognize the token.
    NoMatch,
    /// The stage used the token; later stages still see it.
    Continue,
    /// The stage claimed the token; later stages are skipped.
    Stop,
}

/// Parse state for one input. Created fresh per call and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct ParseState {
    /// Fields recognized so far.
    pub meta: MetaInfo,
    /// No further title tokens are accepted.
    pub halt_title: bool,
    /// No further native-script runs are appended.
    pub halt_native: bool,
    pub last_kind: TokenKind,
    /// Upper-cased (or codec-cased) text of the last keyword seen.
    pub last_text: String,
    /// A numeral waiting for more context before it is treated as title text.
    pub pending: Option<String>,
    /// Raw source value while combinations are still possible.
    pub source: String,
    /// Effect tags in discovery order.
    pub effects: Vec<String>,
}

impl ParseState {
    /// Creates the state for a new parse.
    pub fn new(meta: MetaInfo) -> Self {
        Self {
            meta,
            ..Self::default()
        }
    }

    /// Returns `true` once either title accumulator holds text.
    pub fn has_title(&self) -> bool {
        self.meta.native_title.as_deref().is_some_and(|s| !s.is_empty())
            || self.meta.roman_title.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if any structural field that gates Part is known.
    pub fn has_part_context(&self) -> bool {
        self.meta.year.is_some()
            || self.meta.season.is_set()
            || self.meta.episode.is_set()
            || self.meta.resolution.is_some()
            || !self.source.is_empty()
    }

    /// Returns `true` if any structural field that gates the codec stages is known.
    pub fn has_codec_context(&self) -> bool {
        self.meta.year.is_some()
            || self.meta.season.is_set()
            || self.meta.episode.is_set()
            || self.meta.resolution.is_some()
    }

    /// Appends a word to the romanized title, creating it if needed.
    pub fn push_roman(&mut self, word: &str) {
        push_word(&mut self.meta.roman_title, word);
    }

    /// Appends a word to the native title, creating it if needed.
    pub fn push_native(&mut self, word: &str) {
        push_word(&mut self.meta.native_title, word);
    }

    /// Marks the record as a series.
    pub fn mark_series(&mut self) {
        self.meta.media_type = MediaType::Series;
    }

    /// Records that the token was structural and the title is complete.
    pub fn classify(&mut self, kind: TokenKind) {
        self.last_kind = kind;
        self.halt_title = true;
    }
}

fn push_word(slot: &mut Option<String>, word: &str) {
    match slot {
        Some(existing) if !existing.is_empty() => {
            existing.push(' ');
            existing.push_str(word);
        }
        _ => *slot = Some(word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_words() {
        let mut state = ParseState::default();
        assert!(!state.has_title());
        state.push_roman("The");
        state.push_roman("Matrix");
        assert_eq!(state.meta.roman_title.as_deref(), Some("The Matrix"));
        state.push_native("黑客帝国");
        assert_eq!(state.meta.native_title.as_deref(), Some("黑客帝国"));
        assert!(state.has_title());
    }

    #[test]
    fn part_context() {
        let mut state = ParseState::default();
        assert!(!state.has_part_context());
        state.source = "WEB".into();
        assert!(state.has_part_context());

        assert!(!state.has_codec_context());

        let mut state = ParseState::default();
        state.meta.episode.set_begin(1);
        assert!(state.has_codec_context());
    }

    #[test]
    fn classify_halts_title() {
        let mut state = ParseState::default();
        state.classify(TokenKind::Year);
        assert!(state.halt_title);
        assert_eq!(state.last_kind, TokenKind::Year);
    }
}
