// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Plain-text dump of an [`Analysis`].
//!
//! One line per logical node, indented four spaces per depth:
//!
//! ```text
//! 257 'file_input'
//!     001 'x'
//! ```
//!
//! followed by one line per comment, `size start end line column 'text'`:
//!
//! ```text
//! 3 7 9 1 7 '# c'
//! ```

use std::fmt;

use crate::driver::Analysis;

const INDENT: &str = "    ";

/// Render `analysis` in the dump format.
pub fn render(analysis: &Analysis) -> String {
    Dump(analysis).to_string()
}

/// [`fmt::Display`] adapter for the dump format.
#[derive(Debug, Clone, Copy)]
pub struct Dump<'a>(pub &'a Analysis);

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.0.logical_tree {
            for _ in 0..node.depth {
                f.write_str(INDENT)?;
            }
            writeln!(f, "{} '{}'", node.kind, node.text.as_deref().unwrap_or_default())?;
        }
        for comment in &self.0.comments {
            writeln!(
                f,
                "{} {} {} {} {} '{}'",
                comment.size(),
                comment.start,
                comment.end,
                comment.line,
                comment.column,
                comment.text
            )?;
        }
        Ok(())
    }
}
