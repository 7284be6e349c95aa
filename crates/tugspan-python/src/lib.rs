// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Comment extraction and logical tree projection for tokenized Python.
//!
//! A grammar front end hands over three things for one source file: the raw
//! bytes, the full token stream (comments included) and a parse tree built
//! with comments suppressed. This crate turns them into:
//!
//! - a **logical tree**: the parse tree in pre-order with `NEWLINE`,
//!   `INDENT` and `DEDENT` nodes elided and depths counted over surviving
//!   ancestors only;
//! - **comment records**: every comment in the stream, trimmed to the exact
//!   bytes from its `#` to its last content character, with a corrected
//!   line and column.
//!
//! # Overview
//!
//! - **Resolution**: [`SpanResolver`] trims one comment token.
//! - **Extraction**: [`extract`] resolves every comment in a stream, skipping
//!   and reporting tokens that cannot be resolved.
//! - **Projection**: [`project`] (or the lazy [`Projection`]) walks the tree.
//! - **Analysis**: [`analyze`] checks the inputs and runs both.
//! - **Output**: [`dump::render`] and [`diagnostics::render_skipped`] format
//!   an [`Analysis`] for people.
//!
//! # Quick Start
//!
//! ```
//! use tugspan_core::types::ByteSpan;
//! use tugspan_python::{analyze, ParseTreeNode, Token, TokenKind, TokenStream};
//!
//! let buffer = b"  x\n  # c\n";
//! let stream = TokenStream::new(vec![
//!     Token::new(TokenKind::Indent, ByteSpan::new(0, 2), 1, 0),
//!     Token::new(TokenKind::Other(1), ByteSpan::new(2, 3), 1, 2),
//!     Token::new(TokenKind::Newline, ByteSpan::new(3, 4), 1, 3),
//!     Token::new(TokenKind::Comment, ByteSpan::new(4, 10), 2, 0),
//!     Token::new(TokenKind::Dedent, ByteSpan::new(10, 10), 3, 0),
//! ]);
//! let tree = ParseTreeNode::new(TokenKind::Indent).with_child(
//!     ParseTreeNode::leaf(TokenKind::Other(1), "x")
//!         .with_child(ParseTreeNode::new(TokenKind::Newline)),
//! );
//!
//! let analysis = analyze(buffer, &stream, Some(&tree)).unwrap();
//! assert_eq!(tugspan_python::dump::render(&analysis), "001 'x'\n3 6 8 2 2 '# c'\n");
//! ```
//!
//! All inputs are read-only and every operation is a pure function, so any
//! number of analyses may run concurrently over the same parse result.

// ============================================================================
// Public modules and re-exports
// ============================================================================

/// Tokens and token streams.
pub mod token;
pub use token::{Token, TokenKind, TokenStream};

/// Parse tree nodes.
pub mod tree;
pub use tree::ParseTreeNode;

/// Configuration.
pub mod options;
pub use options::{AnalyzeOptions, ColumnUnit};

/// Comment records and classification.
pub mod record;
pub use record::{CommentKind, CommentRecord};

/// CML comment bodies.
pub mod cml;
pub use cml::CmlComment;

pub mod resolver;
pub use resolver::{resolve, SpanResolver};

pub mod comments;
pub use comments::{extract, extract_with_options, Extraction, SkippedComment};

pub mod projector;
pub use projector::{project, LogicalNode, Projection};

pub mod driver;
pub use driver::{analyze, analyze_with_options, Analysis};

/// Text dump of an analysis.
pub mod dump;

/// Annotated diagnostics for skipped comments.
pub mod diagnostics;
