// SPDX-License-Identifier: Apache-2.0

//! Pull tokenizer over a complete input buffer.
//!
//! Each call to [`Tokenizer::read_next_token`] skips the previous token and
//! any whitespace, then classifies and measures the next token. Tokens are
//! spans into the input, nothing is copied.
//!
//! The tokenizer is deliberately shallow:
//! - string escapes are not interpreted, so `\"` terminates a string
//! - numbers are any run of digits and `.` after a leading `-` or digit
//! - literals are matched with a single 32-bit word compare

use crate::char_class::{classify, is_number_tail, CharClass};

use log::trace;

/// Kind of a token produced by the [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// `{`
    ObjectBegin,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayBegin,
    /// `]`
    ArrayEnd,
    /// `:`
    NameSeparator,
    /// `,`
    ValueSeparator,
    /// A quoted string, quotes included.
    String,
    /// A number literal.
    Number,
    /// `null`
    Null,
    /// `true`
    True,
    /// `false`
    False,
}

impl TokenType {
    fn from_structural(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(TokenType::ObjectBegin),
            b'}' => Some(TokenType::ObjectEnd),
            b'[' => Some(TokenType::ArrayBegin),
            b']' => Some(TokenType::ArrayEnd),
            b':' => Some(TokenType::NameSeparator),
            b',' => Some(TokenType::ValueSeparator),
            _ => None,
        }
    }

    /// Short name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenType::ObjectBegin => "{",
            TokenType::ObjectEnd => "}",
            TokenType::ArrayBegin => "[",
            TokenType::ArrayEnd => "]",
            TokenType::NameSeparator => ":",
            TokenType::ValueSeparator => ",",
            TokenType::String => "string",
            TokenType::Number => "number",
            TokenType::Null => "null",
            TokenType::True => "true",
            TokenType::False => "false",
        }
    }
}

impl core::fmt::Display for TokenType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A positioned span of input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'input> {
    /// What the span holds.
    pub kind: TokenType,
    /// Byte offset of the first byte of the span.
    pub offset: usize,
    /// The raw bytes, borrowed from the input.
    pub bytes: &'input [u8],
}

// Literal words, always compared in little-endian order.
const NULL_WORD: u32 = u32::from_le_bytes(*b"null");
const TRUE_WORD: u32 = u32::from_le_bytes(*b"true");
const ALSE_WORD: u32 = u32::from_le_bytes(*b"alse");

/// Pull tokenizer bound to a single input buffer.
#[derive(Debug, Clone)]
pub struct Tokenizer<'input> {
    input: &'input [u8],
    /// Start of the current token.
    pos: usize,
    /// Length of the current token, zero when there is none.
    token_len: usize,
    token_type: Option<TokenType>,
}

impl Default for Tokenizer<'_> {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl<'input> Tokenizer<'input> {
    /// Creates a tokenizer positioned before the first token of `input`.
    pub fn new(input: &'input [u8]) -> Self {
        Tokenizer {
            input,
            pos: 0,
            token_len: 0,
            token_type: None,
        }
    }

    /// Rebinds the tokenizer to the start of a new buffer.
    pub fn reset(&mut self, input: &'input [u8]) {
        *self = Self::new(input);
    }

    /// Advances to the next token.
    ///
    /// Returns `true` when a token was produced. When it returns `false`,
    /// [`bytes_left`](Self::bytes_left) tells the two cases apart: zero means
    /// the input is exhausted, anything else means the byte at
    /// [`consumed`](Self::consumed) could not start a token.
    pub fn read_next_token(&mut self) -> bool {
        self.skip_token();
        self.skip_whitespace();

        let rest = self.remaining();
        let Some(&first) = rest.first() else {
            return false;
        };

        let (kind, len) = match classify(first) {
            CharClass::Structural => (TokenType::from_structural(first), 1),
            CharClass::Quote => (Some(TokenType::String), string_len(rest)),
            CharClass::Number => (Some(TokenType::Number), number_len(rest)),
            CharClass::Null => (Some(TokenType::Null), literal_len(rest, NULL_WORD, 0, 4)),
            CharClass::True => (Some(TokenType::True), literal_len(rest, TRUE_WORD, 0, 4)),
            CharClass::False => (Some(TokenType::False), literal_len(rest, ALSE_WORD, 1, 5)),
            CharClass::Space | CharClass::Unknown => (None, 0),
        };

        if len == 0 {
            trace!("unrecognized byte {:?} at {}", first as char, self.pos);
            return false;
        }
        self.token_type = kind;
        self.token_len = len;
        trace!("token {:?} at {} len {}", kind, self.pos, len);
        kind.is_some()
    }

    /// The current token, if the last read produced one.
    pub fn token(&self) -> Option<Token<'input>> {
        self.token_type.map(|kind| Token {
            kind,
            offset: self.pos,
            bytes: self.token_bytes(),
        })
    }

    /// Kind of the current token.
    pub fn token_type(&self) -> Option<TokenType> {
        self.token_type
    }

    /// Raw bytes of the current token, empty when there is none.
    pub fn token_bytes(&self) -> &'input [u8] {
        let input = self.input;
        input.get(self.pos..self.pos + self.token_len).unwrap_or(&[])
    }

    /// Number of bytes before the current token.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Number of bytes from the current token to the end of input.
    pub fn bytes_left(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Unconsumed input, starting at the current token.
    pub fn remaining(&self) -> &'input [u8] {
        let input = self.input;
        input.get(self.pos..).unwrap_or(&[])
    }

    fn skip_token(&mut self) {
        self.pos += self.token_len;
        self.token_len = 0;
        self.token_type = None;
    }

    fn skip_whitespace(&mut self) {
        let spaces = self
            .remaining()
            .iter()
            .take_while(|&&b| classify(b) == CharClass::Space)
            .count();
        self.pos += spaces;
    }
}

/// Length of a string token including both quotes, zero if unterminated.
fn string_len(rest: &[u8]) -> usize {
    match rest.get(1..).and_then(|body| memchr::memchr(b'"', body)) {
        Some(close) => close + 2,
        None => 0,
    }
}

fn number_len(rest: &[u8]) -> usize {
    1 + rest
        .iter()
        .skip(1)
        .take_while(|&&b| is_number_tail(b))
        .count()
}

/// Matches a literal of `len` bytes by comparing the 4-byte word at `skip`.
///
/// `false` is five bytes long, so its leading `f` is already known from the
/// byte class and the word compare covers `alse`.
fn literal_len(rest: &[u8], word: u32, skip: usize, len: usize) -> usize {
    if rest.len() < len {
        return 0;
    }
    match word_at(rest, skip) {
        Some(found) if found == word => len,
        _ => 0,
    }
}

fn word_at(bytes: &[u8], at: usize) -> Option<u32> {
    let chunk: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    Some(u32::from_le_bytes(chunk))
}
