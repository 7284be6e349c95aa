// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Comment records and comment classification.

use serde::{Deserialize, Serialize};
use tugspan_core::types::ByteSpan;

use crate::cml::CmlComment;

// ============================================================================
// CommentKind
// ============================================================================

/// What a comment is used for.
///
/// CML (Codimension Markup Language) comments carry layout hints for the
/// flowchart renderer: `# cml 1 ...` opens a record and `# cml+ ...`
/// continues the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    #[default]
    Regular,
    Cml,
    CmlContinue,
}

impl CommentKind {
    /// Classify comment text that starts with a one-byte delimiter.
    ///
    /// Spaces and tabs after the delimiter are skipped; text starting with
    /// `cml` is a CML comment, `cml+` a CML continuation.
    pub fn classify(text: &[u8]) -> Self {
        let body = text.get(1..).unwrap_or_default();
        let first = body.iter().position(|&b| b != b' ' && b != b'\t');
        let Some(first) = first else {
            return CommentKind::Regular;
        };

        match body[first..].strip_prefix(b"cml") {
            Some([b'+', ..]) => CommentKind::CmlContinue,
            Some(_) => CommentKind::Cml,
            None => CommentKind::Regular,
        }
    }

    pub fn is_cml(self) -> bool {
        !matches!(self, CommentKind::Regular)
    }
}

// ============================================================================
// CommentRecord
// ============================================================================

/// One comment, trimmed to its content and positioned exactly.
///
/// `start` and `end` are both inclusive: [`bytes`](Self::bytes) is always
/// exactly `buffer[start..=end]`, from the delimiter to the last content
/// byte. `text` holds the same bytes when they are valid UTF-8; otherwise it
/// is their lossy decoding and `raw` keeps the original bytes. `line` and
/// `column` locate the delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Offset of the delimiter.
    pub start: usize,
    /// Offset of the last content byte (inclusive).
    pub end: usize,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column of the delimiter (0-indexed).
    pub column: u32,
    pub text: String,
    /// Exact content bytes, present only when they are not valid UTF-8.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<u8>>,
    #[serde(default)]
    pub kind: CommentKind,
    /// Parsed body of a CML comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cml: Option<CmlComment>,
}

impl CommentRecord {
    /// Number of content bytes; always `bytes().len()`.
    pub fn size(&self) -> usize {
        self.end - self.start + 1
    }

    /// The exact content bytes.
    pub fn bytes(&self) -> &[u8] {
        match &self.raw {
            Some(raw) => raw,
            None => self.text.as_bytes(),
        }
    }

    /// Content as a half-open span.
    pub fn span(&self) -> ByteSpan {
        ByteSpan::inclusive(self.start, self.end)
    }
}
