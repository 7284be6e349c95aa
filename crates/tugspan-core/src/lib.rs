//! Core infrastructure for tugspan.
//!
//! This crate provides the language-agnostic pieces shared by the
//! reconciliation layer:
//! - Byte spans and source locations
//! - Line index and byte/char column conversions
//! - Error types and error codes

pub mod error;
pub mod text;
pub mod types;
