// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parse tree handed over by the grammar front end.
//!
//! Each node owns its children, so the tree has no cycles and no parent
//! links. Off-channel tokens (comments) never appear here; structural
//! markers (`NEWLINE`, `INDENT`, `DEDENT`) usually do.

use serde::{Deserialize, Serialize};
use tugspan_core::text::extract_span;
use tugspan_core::types::SourceLocation;

use crate::token::{Token, TokenKind};

/// A node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTreeNode {
    pub kind: TokenKind,
    /// Literal text (token text for leaves, rule name for imaginary nodes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Location of the token this node was built from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<SourceLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParseTreeNode>,
}

impl ParseTreeNode {
    /// A node with no text, origin or children.
    pub fn new(kind: TokenKind) -> Self {
        ParseTreeNode {
            kind,
            text: None,
            origin: None,
            children: Vec::new(),
        }
    }

    /// A node with literal text.
    pub fn leaf(kind: TokenKind, text: impl Into<String>) -> Self {
        ParseTreeNode::new(kind).with_text(text)
    }

    /// A leaf built from a token, with the token's bytes as its text.
    ///
    /// Bytes outside `buffer` yield an empty text; invalid UTF-8 is
    /// replaced lossily.
    pub fn from_token(token: &Token, buffer: &[u8]) -> Self {
        let origin = token.location();
        let bytes = extract_span(buffer, &origin.span()).unwrap_or_default();
        ParseTreeNode::leaf(token.kind, String::from_utf8_lossy(bytes)).with_origin(origin)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_origin(mut self, origin: SourceLocation) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_child(mut self, child: ParseTreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ParseTreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        self.count_where(|_| true)
    }

    /// Number of structural-noise nodes in this subtree.
    pub fn noise_count(&self) -> usize {
        self.count_where(|node| node.kind.is_structural_noise())
    }

    fn count_where(&self, predicate: impl Fn(&ParseTreeNode) -> bool) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if predicate(node) {
                count += 1;
            }
            stack.extend(node.children.iter());
        }
        count
    }
}
