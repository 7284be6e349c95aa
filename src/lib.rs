//! Tugspan: source-exact comments and logical trees for tokenized Python
//!
//! Reconciles the three artifacts a grammar front end produces for one
//! file (the raw buffer, the full token stream and the parse tree) into a
//! logical tree plus exact comment records for editors and renderers.

// Core infrastructure - re-exported from tugspan-core
pub use tugspan_core::error;
pub use tugspan_core::text;
pub use tugspan_core::types;

// Language adapters
pub use tugspan_python as python;

// Front door
pub use tugspan_python::{analyze, analyze_with_options, Analysis, AnalyzeOptions};
