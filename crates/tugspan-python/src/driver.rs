// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Driver: one analysis over one parse result.
//!
//! [`analyze`] checks that the inputs belong together, then runs the tree
//! projection and the comment extraction. Input problems are fatal and
//! returned as an error. Per-comment problems are not; they are reported in
//! [`Analysis::skipped`].
//!
//! # Example
//!
//! ```
//! use tugspan_core::types::ByteSpan;
//! use tugspan_python::{analyze, ParseTreeNode, Token, TokenKind, TokenStream};
//!
//! let buffer = b"x  # c\n";
//! let stream = TokenStream::new(vec![
//!     Token::new(TokenKind::Other(1), ByteSpan::new(0, 1), 1, 0),
//!     Token::new(TokenKind::Comment, ByteSpan::new(1, 7), 1, 1),
//! ]);
//! let tree = ParseTreeNode::leaf(TokenKind::Other(1), "x");
//!
//! let analysis = analyze(buffer, &stream, Some(&tree)).unwrap();
//! assert_eq!(analysis.logical_tree.len(), 1);
//! assert_eq!(analysis.comments[0].text, "# c");
//! ```

use serde::Serialize;
use tugspan_core::error::{SpanError, SpanResult};

use crate::comments::{extract_with_options, SkippedComment};
use crate::options::AnalyzeOptions;
use crate::projector::{project, LogicalNode};
use crate::record::CommentRecord;
use crate::token::TokenStream;
use crate::tree::ParseTreeNode;

/// Combined view of one parse result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub logical_tree: Vec<LogicalNode>,
    pub comments: Vec<CommentRecord>,
    pub skipped: Vec<SkippedComment>,
}

impl Analysis {
    /// Raw start offsets of the skipped comment tokens.
    pub fn skipped_offsets(&self) -> Vec<usize> {
        self.skipped.iter().map(|skip| skip.offset).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Analyze with default options.
///
/// # Errors
///
/// See [`analyze_with_options`].
pub fn analyze(
    buffer: &[u8],
    stream: &TokenStream,
    root: Option<&ParseTreeNode>,
) -> SpanResult<Analysis> {
    analyze_with_options(buffer, stream, root, &AnalyzeOptions::default())
}

/// Project `root` and extract the comments of `stream`.
///
/// # Errors
///
/// - [`SpanError::NullTree`] if `root` is `None`.
/// - [`SpanError::EmptyStream`] if `stream` holds no tokens.
/// - [`SpanError::BufferMismatch`] if `stream` was not produced over
///   `buffer`.
pub fn analyze_with_options(
    buffer: &[u8],
    stream: &TokenStream,
    root: Option<&ParseTreeNode>,
    options: &AnalyzeOptions,
) -> SpanResult<Analysis> {
    let root = root.ok_or(SpanError::NullTree)?;
    if stream.is_empty() {
        return Err(SpanError::EmptyStream);
    }
    stream.validate(buffer.len())?;

    let logical_tree = project(root);
    let extraction = extract_with_options(buffer, stream, options);

    tracing::debug!(
        buffer_len = buffer.len(),
        tokens = stream.len(),
        logical_nodes = logical_tree.len(),
        comments = extraction.comments.len(),
        skipped = extraction.skipped.len(),
        "analysis complete"
    );

    Ok(Analysis {
        logical_tree,
        comments: extraction.comments,
        skipped: extraction.skipped,
    })
}
