//! Error types and error code constants for tugspan.
//!
//! This module provides the single error type (`SpanError`) used by every
//! stage of the reconciliation layer, plus a stable integer code for each
//! error family.
//!
//! ## Recoverable vs Fatal
//!
//! - `MalformedSpan` and `DelimiterNotFound` describe a single bad token.
//!   Comment extraction skips the token, records its offset and keeps going.
//! - `EmptyStream`, `NullTree` and `BufferMismatch` mean the inputs cannot
//!   be analyzed at all. They abort the analysis and reach the caller as-is.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid token (one comment token could not be resolved)
//! - `3`: Missing input (no token stream or no parse tree)
//! - `4`: Input mismatch (token stream does not belong to the buffer)

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result alias used throughout tugspan.
pub type SpanResult<T> = Result<T, SpanError>;

// ============================================================================
// Error Codes
// ============================================================================

/// Stable numeric codes for each error family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum ErrorCode {
    /// A single token's span could not be resolved.
    InvalidToken = 2,
    /// A required input (stream or tree) is missing.
    MissingInput = 3,
    /// The token stream and the buffer disagree.
    InputMismatch = 4,
}

impl ErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// SpanError
// ============================================================================

/// Everything that can go wrong while reconciling tokens, tree and buffer.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpanError {
    /// Token span is empty, inverted, or leaves the buffer.
    #[error("malformed span {start}..{end}: {reason}")]
    MalformedSpan {
        start: usize,
        end: usize,
        reason: String,
    },

    /// Comment token holds no delimiter before its end.
    #[error("no comment delimiter in span {start}..{end}")]
    DelimiterNotFound { start: usize, end: usize },

    /// A parse tree was supplied but the token stream is empty.
    #[error("token stream is empty")]
    EmptyStream,

    /// No parse tree was supplied.
    #[error("parse tree is missing")]
    NullTree,

    /// Token offsets do not fit the buffer, or are out of order.
    #[error("token stream does not match buffer at offset {offset}: {reason}")]
    BufferMismatch { offset: usize, reason: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&SpanError> for ErrorCode {
    fn from(err: &SpanError) -> Self {
        match err {
            SpanError::MalformedSpan { .. } => ErrorCode::InvalidToken,
            SpanError::DelimiterNotFound { .. } => ErrorCode::InvalidToken,
            SpanError::EmptyStream => ErrorCode::MissingInput,
            SpanError::NullTree => ErrorCode::MissingInput,
            SpanError::BufferMismatch { .. } => ErrorCode::InputMismatch,
        }
    }
}

impl From<SpanError> for ErrorCode {
    fn from(err: SpanError) -> Self {
        ErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl SpanError {
    /// Create a malformed span error.
    pub fn malformed(start: usize, end: usize, reason: impl Into<String>) -> Self {
        SpanError::MalformedSpan {
            start,
            end,
            reason: reason.into(),
        }
    }

    /// Create a buffer mismatch error.
    pub fn mismatch(offset: usize, reason: impl Into<String>) -> Self {
        SpanError::BufferMismatch {
            offset,
            reason: reason.into(),
        }
    }

    /// Whether the error concerns a single token and can be skipped.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpanError::MalformedSpan { .. } | SpanError::DelimiterNotFound { .. }
        )
    }

    /// Raw start offset of the offending input, if the error has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            SpanError::MalformedSpan { start, .. } => Some(*start),
            SpanError::DelimiterNotFound { start, .. } => Some(*start),
            SpanError::BufferMismatch { offset, .. } => Some(*offset),
            SpanError::EmptyStream | SpanError::NullTree => None,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
