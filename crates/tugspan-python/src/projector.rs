// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! TreeProjector: the logical view of a parse tree.
//!
//! The projection is a pre-order, left-to-right walk that drops
//! structural-noise nodes (`NEWLINE`, `INDENT`, `DEDENT`). Dropped nodes are
//! transparent: their children are emitted at the depth the dropped node
//! would have had, so depth only counts surviving ancestors.
//!
//! The walk keeps its own stack instead of recursing, so arbitrarily deep
//! trees project without growing the call stack.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tugspan_core::types::SourceLocation;

use crate::token::TokenKind;
use crate::tree::ParseTreeNode;

/// A parse tree node as seen through the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalNode {
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Number of surviving ancestors.
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<SourceLocation>,
}

/// Lazy projection of a tree, yielding [`LogicalNode`]s in pre-order.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    stack: Vec<(&'a ParseTreeNode, usize)>,
}

impl<'a> Projection<'a> {
    pub fn new(root: &'a ParseTreeNode) -> Self {
        Projection {
            stack: vec![(root, 0)],
        }
    }
}

impl Iterator for Projection<'_> {
    type Item = LogicalNode;

    fn next(&mut self) -> Option<LogicalNode> {
        while let Some((node, depth)) = self.stack.pop() {
            let noise = node.kind.is_structural_noise();
            let child_depth = if noise { depth } else { depth + 1 };

            // Reversed so the leftmost child is popped first.
            self.stack
                .extend(node.children.iter().rev().map(|child| (child, child_depth)));

            if !noise {
                return Some(LogicalNode {
                    kind: node.kind,
                    text: node.text.clone(),
                    depth,
                    origin: node.origin,
                });
            }
        }
        None
    }
}

impl FusedIterator for Projection<'_> {}

/// Project the whole tree under `root`.
pub fn project(root: &ParseTreeNode) -> Vec<LogicalNode> {
    Projection::new(root).collect()
}
