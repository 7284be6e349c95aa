//! Common span and location types shared by tokens, tree nodes and records.
//!
//! Offsets are byte offsets into a single source buffer. Lines are 1-indexed,
//! columns are 0-indexed (matching the token metadata produced by the
//! grammar front end).

use serde::{Deserialize, Serialize};

// ============================================================================
// ByteSpan
// ============================================================================

/// A half-open byte range `[start, end)` into a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ByteSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl ByteSpan {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "ByteSpan start ({}) must be <= end ({})",
            start,
            end
        );
        ByteSpan { start, end }
    }

    /// Create a span covering the inclusive range `[first, last]`.
    pub fn inclusive(first: usize, last: usize) -> Self {
        ByteSpan::new(first, last + 1)
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if the whole span lies within a buffer of `len` bytes.
    pub fn fits(&self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }

    /// Check if this span contains another span entirely.
    pub fn contains(&self, other: &ByteSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

// ============================================================================
// SourceLocation
// ============================================================================

/// Where a token or tree node came from: its byte span plus the line and
/// column of its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column (0-indexed, from the start of the line).
    pub column: u32,
}

impl SourceLocation {
    pub fn new(span: ByteSpan, line: u32, column: u32) -> Self {
        SourceLocation {
            start: span.start,
            end: span.end,
            line,
            column,
        }
    }

    /// The byte span of this location.
    pub fn span(&self) -> ByteSpan {
        ByteSpan::new(self.start, self.end)
    }
}

// ============================================================================
// Tests
// ============================================================================
