//! # Tokenizer
//!
//! Splits a pre-cleaned release name into tokens and exposes them as a
//! cursor over a fixed sequence, so stages can peek forward and look back
//! by index.

use crate::text::is_native_char;

/// A token extracted from a release name with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, case preserved
    pub text: String,
    /// Start byte offset in the cleaned string
    pub start: usize,
    /// End byte offset in the cleaned string
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
}

/// Characters that always end a token. Brackets are included so that a
/// bracketed group surfaces as its own token with the brackets stripped.
const DELIMITERS: &[char] = &[
    '.', '_', '/', '~', '～', ';', '&', '|', '#', '(', ')', '[', ']', '【', '】', '「', '」',
];

/// Tokenizer for release names.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a release name into a sequence of tokens.
    ///
    /// # Examples
    /// ```
    /// use releasemeta_core::parser::tokenizer::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("Show.Name.S01E01-E03.720p");
    /// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(texts, ["Show", "Name", "S01E01", "E03", "720p"]);
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current_start = 0;
        let mut prev: Option<char> = None;
        let mut chars = input.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            let next = chars.peek().map(|&(_, n)| n);
            if self.is_split(c, prev, next) {
                self.emit(input, current_start, idx, &mut tokens);
                current_start = idx + c.len_utf8();
            }
            prev = Some(c);
        }
        self.emit(input, current_start, input.len(), &mut tokens);

        tokens
    }

    /// `-` only splits when it does not join two native-script characters.
    fn is_split(&self, c: char, prev: Option<char>, next: Option<char>) -> bool {
        if c.is_whitespace() || DELIMITERS.contains(&c) {
            return true;
        }
        if c == '-' {
            let joins_native = prev.is_some_and(is_native_char) && next.is_some_and(is_native_char);
            return !joins_native;
        }
        false
    }

    fn emit(&self, input: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
        if end > start {
            tokens.push(Token {
                text: input[start..end].to_string(),
                start,
                end,
                index: tokens.len(),
            });
        }
    }
}

/// A cursor over a fixed, pre-materialized token sequence.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    /// Tokenizes `input` and positions the cursor before the first token.
    pub fn new(input: &str) -> Self {
        Self {
            tokens: Tokenizer::new().tokenize(input),
            cursor: 0,
        }
    }

    /// Returns the next token and advances, or `None` at end of stream.
    pub fn next_token(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    /// The token the next call to [`next_token`](Self::next_token) would return.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Consumes the lookahead token without returning it.
    pub fn skip(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
    }

    /// Any token by its index.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The tokens in `[start, end)`, clamped to the stream.
    pub fn window(&self, start: usize, end: usize) -> &[Token] {
        let end = end.min(self.tokens.len());
        let start = start.min(end);
        &self.tokens[start..end]
    }

    /// Total number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if there are no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        Tokenizer::new()
            .tokenize(input)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_tokenize_with_dots() {
        assert_eq!(
            texts("Friends.S01E02.1080p.BluRay.x264-GROUP"),
            ["Friends", "S01E02", "1080p", "BluRay", "x264", "GROUP"]
        );
    }

    #[test]
    fn test_brackets_become_tokens() {
        assert_eq!(
            texts("Title (2019) [1080p]【中字】"),
            ["Title", "2019", "1080p", "中字"]
        );
    }

    #[test]
    fn test_hyphen_between_native_chars_is_kept() {
        assert_eq!(texts("蜘蛛-侠 WEB-DL"), ["蜘蛛-侠", "WEB", "DL"]);
    }

    #[test]
    fn test_case_preserved_and_positions() {
        let tokens = Tokenizer::new().tokenize("The_Matrix");
        assert_eq!(tokens[0].text, "The");
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[1].end, 10);
        assert_eq!(tokens[1].index, 1);
    }

    #[test]
    fn test_tokenize_only_delimiters() {
        assert!(texts("[[[]]]()..--__").is_empty());
        assert!(texts("").is_empty());
    }

    #[test]
    fn test_stream_cursor() {
        let mut stream = TokenStream::new("a.b.c.d");
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.next_token().map(|t| t.text.as_str()), Some("a"));
        assert_eq!(stream.peek().map(|t| t.text.as_str()), Some("b"));
        stream.skip();
        assert_eq!(stream.next_token().map(|t| t.text.as_str()), Some("c"));
        assert_eq!(stream.get(0).map(|t| t.text.as_str()), Some("a"));
        assert_eq!(stream.window(1, 10).len(), 3);
        assert_eq!(stream.next_token().map(|t| t.index), Some(3));
        assert!(stream.next_token().is_none());
        stream.skip();
        assert!(stream.peek().is_none());
    }
}
