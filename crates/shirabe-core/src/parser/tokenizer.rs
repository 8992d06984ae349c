//! # Tokenizer
//!
//! Splits a release filename into offset-tagged tokens. The token spans,
//! including discarded whitespace runs, tile the input exactly: concatenating
//! every token text in order reproduces the original string byte for byte.
//! Whitespace tokens participate in offset accounting but are excluded from
//! the decoded label sequence.

/// What kind of run produced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A `[...]` or `(...)` run, delimiters included.
    Bracket,
    /// A maximal whitespace run. Not forwarded to the decoder.
    Whitespace,
    /// One of the single-character delimiters `. , ; : _ / -`.
    Delimiter,
    /// Any other maximal run of characters.
    Word,
}

/// A token with byte offsets into the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, verbatim from the input (original case preserved).
    pub text: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// The rule that produced this token.
    pub kind: TokenKind,
}

impl Token {
    /// Whether this token is forwarded to the tagging stages.
    pub fn is_significant(&self) -> bool {
        self.kind != TokenKind::Whitespace
    }
}

/// Single-character delimiter class.
const DELIMITERS: &[char] = &['.', ',', ';', ':', '_', '/', '-'];

/// Filename tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a filename into an ordered, gap-free token sequence.
    ///
    /// Rules, in priority order at each position:
    /// 1. `[` or `(` opens a bracket run ending at the next matching close
    ///    (or end of string if unterminated).
    /// 2. A maximal whitespace run becomes one [`TokenKind::Whitespace`] token.
    /// 3. Each of `. , ; : _ / -` becomes its own one-character token.
    /// 4. Any other maximal run becomes one [`TokenKind::Word`] token.
    ///
    /// Empty input yields an empty sequence.
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut i = 0;

        while let Some(c) = input[i..].chars().next() {
            let (end, kind) = if c == '[' || c == '(' {
                let close = if c == '[' { ']' } else { ')' };
                let end = input[i + 1..]
                    .find(close)
                    .map(|p| i + 1 + p + close.len_utf8())
                    .unwrap_or(input.len());
                (end, TokenKind::Bracket)
            } else if c.is_whitespace() {
                (
                    i + run_len(&input[i..], |c| c.is_whitespace()),
                    TokenKind::Whitespace,
                )
            } else if DELIMITERS.contains(&c) {
                (i + c.len_utf8(), TokenKind::Delimiter)
            } else {
                (
                    i + run_len(&input[i..], is_word_char),
                    TokenKind::Word,
                )
            };

            tokens.push(Token {
                text: input[i..end].to_string(),
                start: i,
                end,
                kind,
            });
            i = end;
        }

        tokens
    }
}

/// Byte length of the maximal leading run of chars satisfying `pred`.
fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !DELIMITERS.contains(&c) && c != '[' && c != '('
}
