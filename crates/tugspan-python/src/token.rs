// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tokens and token streams handed over by the grammar front end.
//!
//! The stream is the *full* stream: it still holds the off-channel tokens
//! (comments) that the parser never saw. Tokens are immutable once built.

use std::fmt;

use serde::{Deserialize, Serialize};
use tugspan_core::error::{SpanError, SpanResult};
use tugspan_core::types::{ByteSpan, SourceLocation};

// ============================================================================
// TokenKind
// ============================================================================

/// Type tag shared by tokens and parse tree nodes.
///
/// Only the kinds this layer acts on are named; everything else carries
/// the front end's grammar type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `#` comment, off-channel.
    Comment,
    /// Logical line break.
    Newline,
    /// Indentation increase marker.
    Indent,
    /// Indentation decrease marker.
    Dedent,
    /// Any other token or rule, identified by its grammar type code.
    Other(u32),
}

impl TokenKind {
    /// Kinds that only encode layout: elided from the logical tree.
    pub const fn is_structural_noise(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent)
    }

    pub const fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Comment => f.write_str("COMMENT"),
            TokenKind::Newline => f.write_str("NEWLINE"),
            TokenKind::Indent => f.write_str("INDENT"),
            TokenKind::Dedent => f.write_str("DEDENT"),
            TokenKind::Other(code) => write!(f, "{:03}", code),
        }
    }
}

// ============================================================================
// Token
// ============================================================================

/// One token: kind, raw half-open byte span `[start, end)`, and the line and
/// column the tokenizer reported for `start`.
///
/// The raw span of a comment may include leading whitespace and the line
/// break that follows it; see [`crate::resolver`] for how that is trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column of `start` (0-indexed).
    pub column: u32,
}

impl Token {
    /// Create a token from its raw span and reported position.
    pub fn new(kind: TokenKind, span: ByteSpan, line: u32, column: u32) -> Self {
        Token {
            kind,
            start: span.start,
            end: span.end,
            line,
            column,
        }
    }

    /// Raw span length in bytes (0 for empty or inverted spans).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Location of the raw token, as reported by the tokenizer.
    ///
    /// Inverted spans are collapsed to their start.
    pub fn location(&self) -> SourceLocation {
        SourceLocation {
            start: self.start,
            end: self.end.max(self.start),
            line: self.line,
            column: self.column,
        }
    }
}

// ============================================================================
// TokenStream
// ============================================================================

/// Ordered, random-access sequence of tokens (stream order = source order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Comment tokens only, in stream order.
    pub fn comments(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|token| token.kind.is_comment())
    }

    /// Check that this stream was produced over a buffer of `buffer_len`
    /// bytes: no span is inverted, every offset lies within the buffer and
    /// start offsets never decrease.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::BufferMismatch`] naming the first offending token.
    pub fn validate(&self, buffer_len: usize) -> SpanResult<()> {
        let mut previous_start = 0;

        for (index, token) in self.tokens.iter().enumerate() {
            if token.start > token.end {
                return Err(SpanError::mismatch(
                    token.start,
                    format!(
                        "token {} has an inverted span {}..{}",
                        index, token.start, token.end
                    ),
                ));
            }
            if token.start > buffer_len || token.end > buffer_len {
                return Err(SpanError::mismatch(
                    token.start,
                    format!(
                        "token {} spans {}..{} but the buffer holds {} bytes",
                        index, token.start, token.end, buffer_len
                    ),
                ));
            }
            if token.start < previous_start {
                return Err(SpanError::mismatch(
                    token.start,
                    format!(
                        "token {} starts before the previous token at {}",
                        index, previous_start
                    ),
                ));
            }
            previous_start = token.start;
        }

        Ok(())
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenStream::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
