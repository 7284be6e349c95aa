// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! CML (Codimension Markup Language) comment bodies.
//!
//! A CML comment opens a record and a `cml+` comment continues the previous
//! one:
//!
//! ```text
//! # cml 1 cc background="#f00" foreground=black
//! # cml+ text="a long " "merged value"
//! ```
//!
//! An opening comment carries an integer version and a record type, then
//! `key=value` properties. A continuation carries properties only. Values
//! are bare tokens or double-quoted strings; inside quotes `\"` is a literal
//! quote, and quoted parts separated only by blanks merge into one value.
//!
//! Parsing never fails. Problems are collected in [`CmlComment::warnings`]
//! and parsing stops at the first one.
//!
//! # Example
//!
//! ```
//! use tugspan_python::CmlComment;
//!
//! let cml = CmlComment::parse(br##"# cml 1 cc background="#f00""##).unwrap();
//! assert_eq!(cml.version, Some(1));
//! assert_eq!(cml.record_type.as_deref(), Some("cc"));
//! assert_eq!(cml.properties["background"], "#f00");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const UNFINISHED_QUOTE: &str = "Unfinished double quote for a property value";

/// Parsed body of a CML comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CmlComment {
    /// Record version; `None` for continuations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Record type code such as `cc` or `rt`; `None` for continuations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl CmlComment {
    /// Parse comment text that starts with a one-byte delimiter.
    ///
    /// Returns `None` unless the text after the delimiter and any blanks
    /// starts with `cml`.
    pub fn parse(text: &[u8]) -> Option<Self> {
        let mut cursor = Cursor::new(text, 1);
        cursor.skip_blanks();
        if !cursor.rest().starts_with(b"cml") {
            return None;
        }
        cursor.pos += 3;

        let mut cml = CmlComment::default();
        if cursor.peek() == Some(b'+') {
            cursor.pos += 1;
        } else if !cml.parse_header(&mut cursor) {
            return Some(cml);
        }
        cml.parse_properties(&mut cursor);
        Some(cml)
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Version and record type. Returns false if parsing has to stop.
    fn parse_header(&mut self, cursor: &mut Cursor<'_>) -> bool {
        let version = cursor.token();
        if version.is_empty() {
            self.warnings.push("CML version is missing".to_string());
            return false;
        }
        match version.parse::<u32>() {
            Ok(version) => self.version = Some(version),
            Err(_) => {
                self.warnings
                    .push(format!("Invalid CML version '{}', expected an integer", version));
                return false;
            }
        }

        let record_type = cursor.token();
        if record_type.is_empty() {
            self.warnings.push("CML record type is missing".to_string());
            return false;
        }
        self.record_type = Some(record_type);
        true
    }

    fn parse_properties(&mut self, cursor: &mut Cursor<'_>) {
        loop {
            let key = cursor.token();
            if key.is_empty() {
                return;
            }
            if key == "=" {
                self.warnings
                    .push("Property name is missing before '='".to_string());
                return;
            }
            if cursor.token() != "=" {
                self.warnings
                    .push(format!("Expected '=' after property name '{}'", key));
                return;
            }
            match cursor.value() {
                Some(value) => {
                    self.properties.insert(key, value);
                }
                None => {
                    self.warnings.push(UNFINISHED_QUOTE.to_string());
                    return;
                }
            }
        }
    }
}

/// Byte cursor over one comment.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8], pos: usize) -> Self {
        Cursor { bytes, pos }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn rest(&self) -> &'a [u8] {
        self.bytes.get(self.pos..).unwrap_or_default()
    }

    fn skip_blanks(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// A run of non-blank bytes ending at a blank or `=`, or a lone `=`.
    fn token(&mut self) -> String {
        self.skip_blanks();
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == b'=' {
                if self.pos == start {
                    self.pos += 1;
                    return "=".to_string();
                }
                break;
            }
            if byte.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }

    /// A bare token or a quoted value. `None` if a quote is left open.
    fn value(&mut self) -> Option<String> {
        self.skip_blanks();
        match self.peek() {
            None => return Some(String::new()),
            Some(b'"') => self.pos += 1,
            Some(_) => return Some(self.token()),
        }

        let mut value = Vec::new();
        while let Some(byte) = self.peek() {
            match byte {
                b'\\' if self.bytes.get(self.pos + 1) == Some(&b'"') => {
                    value.push(b'"');
                    self.pos += 2;
                }
                b'"' => {
                    self.pos += 1;
                    let mut ahead = self.pos;
                    while self.bytes.get(ahead).is_some_and(|b| b.is_ascii_whitespace()) {
                        ahead += 1;
                    }
                    if self.bytes.get(ahead) == Some(&b'"') {
                        self.pos = ahead + 1;
                        continue;
                    }
                    return Some(String::from_utf8_lossy(&value).into_owned());
                }
                _ => {
                    value.push(byte);
                    self.pos += 1;
                }
            }
        }
        None
    }
}
