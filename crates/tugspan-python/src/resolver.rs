// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! SpanResolver: trims a comment token's raw span to its content.
//!
//! The tokenizer may capture leading whitespace before the `#` and the line
//! break (or a NUL sentinel) after the comment inside a comment token. The
//! resolver recovers the exact content range:
//!
//! 1. Scan forward from the raw start to the delimiter, advancing line and
//!    column in lock-step with every skipped byte.
//! 2. Scan backward from the raw end over line terminators, NUL bytes and
//!    (by default) trailing blanks, stopping at the delimiter at the latest.
//!
//! A comment made of the delimiter alone resolves to a one-byte record.
//!
//! # Example
//!
//! ```
//! use tugspan_core::types::ByteSpan;
//! use tugspan_python::{resolve, Token, TokenKind};
//!
//! let buffer = b"   # hello \n";
//! let token = Token::new(TokenKind::Comment, ByteSpan::new(0, 12), 1, 0);
//! let record = resolve(buffer, &token).unwrap();
//! assert_eq!(record.text, "# hello");
//! assert_eq!((record.start, record.end, record.column), (3, 9, 3));
//! ```

use tugspan_core::error::{SpanError, SpanResult};
use tugspan_core::text::LineIndex;

use crate::cml::CmlComment;
use crate::options::{AnalyzeOptions, ColumnUnit};
use crate::record::{CommentKind, CommentRecord};
use crate::token::Token;

/// Resolve one comment token against `buffer` with default options.
///
/// # Errors
///
/// See [`SpanResolver::resolve`].
pub fn resolve(buffer: &[u8], token: &Token) -> SpanResult<CommentRecord> {
    SpanResolver::new(buffer, &AnalyzeOptions::default()).resolve(token)
}

/// Resolves comment tokens over one buffer.
///
/// Holds the line index when columns are counted in characters, so build
/// one resolver per buffer and reuse it for every token.
#[derive(Debug)]
pub struct SpanResolver<'a> {
    buffer: &'a [u8],
    options: &'a AnalyzeOptions,
    line_index: Option<LineIndex>,
}

impl<'a> SpanResolver<'a> {
    pub fn new(buffer: &'a [u8], options: &'a AnalyzeOptions) -> Self {
        let line_index = match options.column_unit {
            ColumnUnit::Byte => None,
            ColumnUnit::Char => Some(LineIndex::new(buffer)),
        };
        SpanResolver {
            buffer,
            options,
            line_index,
        }
    }

    /// Trim a comment token to `[delimiter, last content byte]`.
    ///
    /// # Errors
    ///
    /// - [`SpanError::MalformedSpan`] if the token is not a comment, its span
    ///   is empty or inverted, or it ends past the buffer.
    /// - [`SpanError::DelimiterNotFound`] if no delimiter byte occurs in the
    ///   raw span.
    pub fn resolve(&self, token: &Token) -> SpanResult<CommentRecord> {
        let (start, end) = (token.start, token.end);

        if !token.kind.is_comment() {
            return Err(SpanError::malformed(
                start,
                end,
                format!("expected a comment token, found {}", token.kind),
            ));
        }
        if start >= end {
            return Err(SpanError::malformed(start, end, "empty span"));
        }
        if end > self.buffer.len() {
            return Err(SpanError::malformed(
                start,
                end,
                format!("span leaves the {}-byte buffer", self.buffer.len()),
            ));
        }

        let raw = &self.buffer[start..end];
        let skip = memchr::memchr(self.options.delimiter, raw)
            .ok_or(SpanError::DelimiterNotFound { start, end })?;
        let delimiter = start + skip;
        let (line, byte_column) = advance(token.line, token.column, &raw[..skip]);

        let mut last = end - 1;
        while last > delimiter && self.options.is_trailing_noise(self.buffer[last]) {
            last -= 1;
        }

        let column = match &self.line_index {
            Some(index) => index.char_position(self.buffer, delimiter).1,
            None => byte_column,
        };

        let content = &self.buffer[delimiter..=last];
        let kind = if self.options.classify_cml {
            CommentKind::classify(content)
        } else {
            CommentKind::Regular
        };
        let cml = if kind.is_cml() {
            CmlComment::parse(content)
        } else {
            None
        };
        let (text, raw) = match std::str::from_utf8(content) {
            Ok(text) => (text.to_owned(), None),
            Err(_) => (
                String::from_utf8_lossy(content).into_owned(),
                Some(content.to_vec()),
            ),
        };

        tracing::trace!(start = delimiter, end = last, line, column, "resolved comment");

        Ok(CommentRecord {
            start: delimiter,
            end: last,
            line,
            column,
            text,
            raw,
            kind,
            cml,
        })
    }
}

/// Move a `(line, column)` position over `skipped` bytes.
fn advance(line: u32, column: u32, skipped: &[u8]) -> (u32, u32) {
    skipped
        .iter()
        .enumerate()
        .fold((line, column), |(line, column), (i, &byte)| match byte {
            b'\n' => (line + 1, 0),
            b'\r' if skipped.get(i + 1) != Some(&b'\n') => (line + 1, 0),
            _ => (line, column + 1),
        })
}
