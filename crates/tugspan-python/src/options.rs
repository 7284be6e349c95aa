// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Options controlling comment resolution and analysis.
//!
//! [`AnalyzeOptions::default()`] matches Python: `#` delimiter, byte
//! columns, trailing whitespace trimmed, CML comments classified.
//!
//! # Example
//!
//! ```
//! use tugspan_python::{AnalyzeOptions, ColumnUnit};
//!
//! let options = AnalyzeOptions::new().with_column_unit(ColumnUnit::Char);
//! assert_eq!(options.delimiter, b'#');
//! ```

use serde::{Deserialize, Serialize};

/// How the column of a comment record is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnUnit {
    /// Bytes from the start of the line, continuing the tokenizer's count.
    #[default]
    Byte,
    /// Unicode scalar values from the start of the line, recomputed from
    /// the buffer.
    Char,
}

/// Configuration for [`crate::analyze_with_options`] and the components
/// it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeOptions {
    /// Byte that opens a comment.
    pub delimiter: u8,
    /// Unit for `CommentRecord::column`.
    pub column_unit: ColumnUnit,
    /// Also trim spaces, tabs and form feeds at the end of a comment, not
    /// only line terminators.
    pub trim_trailing_whitespace: bool,
    /// Detect CML (`# cml ...`) comments.
    pub classify_cml: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            delimiter: b'#',
            column_unit: ColumnUnit::Byte,
            trim_trailing_whitespace: true,
            classify_cml: true,
        }
    }
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_column_unit(mut self, column_unit: ColumnUnit) -> Self {
        self.column_unit = column_unit;
        self
    }

    #[must_use]
    pub fn with_trim_trailing_whitespace(mut self, trim: bool) -> Self {
        self.trim_trailing_whitespace = trim;
        self
    }

    #[must_use]
    pub fn with_classify_cml(mut self, classify: bool) -> Self {
        self.classify_cml = classify;
        self
    }

    /// Whether `byte` is trimmed from the end of a comment.
    pub(crate) fn is_trailing_noise(&self, byte: u8) -> bool {
        tugspan_core::text::is_line_terminator(byte)
            || (self.trim_trailing_whitespace && matches!(byte, b' ' | b'\t' | b'\x0c'))
    }
}
