//! Text position utilities for byte offset and line:column conversions.
//!
//! ## Coordinate Conventions
//!
//! - Lines are **1-indexed**
//! - Columns are **0-indexed**
//! - Byte offsets are **0-indexed**
//!
//! Line breaks are `\n`, `\r\n` and a lone `\r`, the same set the Python
//! tokenizer recognizes.
//!
//! ## Byte vs Char Columns
//!
//! A byte column counts bytes from the start of the line. A char column
//! counts Unicode scalar values, i.e. every byte that is not a UTF-8
//! continuation byte. The two differ only when the line holds non-ASCII
//! text before the offset. Char columns never decode the buffer, so partial
//! or invalid UTF-8 sequences cannot make them fail.

use crate::types::ByteSpan;

// ============================================================================
// LineIndex
// ============================================================================

/// Table of line start offsets for one buffer.
///
/// Built once in O(n); each lookup is a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// `line_starts[i]` is the byte offset where line `i + 1` begins.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Scan `content` and record where every line begins.
    pub fn new(content: &[u8]) -> Self {
        let mut line_starts = vec![0];

        for (pos, &byte) in content.iter().enumerate() {
            match byte {
                b'\n' => line_starts.push(pos + 1),
                b'\r' if content.get(pos + 1) != Some(&b'\n') => line_starts.push(pos + 1),
                _ => {}
            }
        }

        LineIndex {
            line_starts,
            len: content.len(),
        }
    }

    /// Number of lines, counting a trailing empty line after a final break.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the given 1-indexed line begins.
    pub fn line_start(&self, line: u32) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.line_starts.get(line as usize - 1).copied()
    }

    /// The 1-indexed line containing `offset`.
    ///
    /// Offsets beyond the buffer are clamped to its end.
    pub fn line_of(&self, offset: usize) -> u32 {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact + 1,
            Err(next) => next,
        };
        line as u32
    }

    /// Convert a byte offset to `(line, byte_column)`.
    pub fn position(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        let start = self.line_starts[line as usize - 1];
        (line, (offset - start) as u32)
    }

    /// Convert a byte offset to `(line, char_column)`.
    ///
    /// `content` must be the buffer this index was built from.
    pub fn char_position(&self, content: &[u8], offset: usize) -> (u32, u32) {
        let offset = offset.min(self.len).min(content.len());
        let line = self.line_of(offset);
        let start = self.line_starts[line as usize - 1];
        (line, count_chars(&content[start..offset]) as u32)
    }
}

// ============================================================================
// Byte Utilities
// ============================================================================

/// Count Unicode scalar values in a byte slice without decoding it.
///
/// Every byte that does not look like a UTF-8 continuation byte starts a
/// new character; stray continuation bytes are not counted.
pub fn count_chars(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count()
}

/// Extract the bytes of a span.
///
/// Returns `None` if the span extends beyond content bounds.
pub fn extract_span<'a>(content: &'a [u8], span: &ByteSpan) -> Option<&'a [u8]> {
    content.get(span.start..span.end)
}

/// True for the bytes that terminate a line or pad the end of a buffer.
pub fn is_line_terminator(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r' | 0)
}

// ============================================================================
// Tests
// ============================================================================
