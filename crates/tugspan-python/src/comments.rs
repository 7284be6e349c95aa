// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! CommentExtractor: collects comment records from the full token stream.
//!
//! Comments are off-channel, so the parse tree never contains them. The
//! extractor walks the token stream instead, in a single forward pass, and
//! resolves every `Comment` token with a [`SpanResolver`].
//!
//! A token that fails to resolve does not abort extraction. It is recorded
//! as a [`SkippedComment`] and the pass moves on to the next token.

use serde::Serialize;
use tugspan_core::error::SpanError;

use crate::options::AnalyzeOptions;
use crate::record::CommentRecord;
use crate::resolver::SpanResolver;
use crate::token::TokenStream;

/// A comment token that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedComment {
    /// Raw start offset of the token.
    pub offset: usize,
    pub error: SpanError,
}

/// Result of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Resolved comments, ascending by `start`.
    pub comments: Vec<CommentRecord>,
    /// Comment tokens that were skipped, in stream order.
    pub skipped: Vec<SkippedComment>,
}

impl Extraction {
    pub fn skipped_offsets(&self) -> Vec<usize> {
        self.skipped.iter().map(|skip| skip.offset).collect()
    }
}

/// Extract every comment in `stream` with default options.
pub fn extract(buffer: &[u8], stream: &TokenStream) -> Extraction {
    extract_with_options(buffer, stream, &AnalyzeOptions::default())
}

/// Extract every comment in `stream`.
///
/// Only recoverable resolver errors can occur per token, so extraction
/// itself never fails; see [`Extraction::skipped`].
pub fn extract_with_options(
    buffer: &[u8],
    stream: &TokenStream,
    options: &AnalyzeOptions,
) -> Extraction {
    let resolver = SpanResolver::new(buffer, options);
    let mut extraction = Extraction::default();

    for token in stream.comments() {
        match resolver.resolve(token) {
            Ok(record) => extraction.comments.push(record),
            Err(error) => {
                tracing::warn!(
                    offset = token.start,
                    end = token.end,
                    line = token.line,
                    error = %error,
                    "skipping unresolvable comment token"
                );
                extraction.skipped.push(SkippedComment {
                    offset: token.start,
                    error,
                });
            }
        }
    }

    tracing::debug!(
        comments = extraction.comments.len(),
        skipped = extraction.skipped.len(),
        "comment extraction complete"
    );

    extraction
}
