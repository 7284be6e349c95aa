//! Golden tests for analysis output stability.
//!
//! Each fixture under `tests/golden/fixtures/` holds a source buffer, the
//! token stream and parse tree a front end produced for it, and optional
//! analysis options. The analysis is compared against two golden files:
//! the text dump (`.dump`) and the JSON a renderer would consume (`.json`).
//!
//! ## Running Tests
//!
//! ```bash
//! cargo nextest run -p tugspan golden
//! ```
//!
//! ## Updating Golden Files
//!
//! When making intentional output changes:
//! ```bash
//! TUGSPAN_UPDATE_GOLDEN=1 cargo nextest run -p tugspan golden
//! git diff tests/golden/  # Review changes
//! ```

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use tugspan::python::dump;
use tugspan::python::{ParseTreeNode, TokenStream};
use tugspan::{analyze_with_options, Analysis, AnalyzeOptions};

// ============================================================================
// Test Infrastructure
// ============================================================================

/// One recorded parse result.
#[derive(Debug, Deserialize)]
struct Fixture {
    source: String,
    tokens: TokenStream,
    tree: ParseTreeNode,
    #[serde(default)]
    options: AnalyzeOptions,
}

/// Directory containing golden test fixtures.
fn golden_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
        .join("fixtures")
}

/// Directory containing expected output files.
fn golden_output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
        .join("output")
}

/// Check if golden update mode is enabled.
fn update_mode() -> bool {
    std::env::var("TUGSPAN_UPDATE_GOLDEN").is_ok()
}

fn load_fixture(name: &str) -> Fixture {
    let path = golden_fixtures_dir().join(format!("{}.json", name));
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {}", path.display(), e))
}

fn run_fixture(name: &str) -> Analysis {
    let fixture = load_fixture(name);
    analyze_with_options(
        fixture.source.as_bytes(),
        &fixture.tokens,
        Some(&fixture.tree),
        &fixture.options,
    )
    .unwrap_or_else(|e| panic!("analysis of {} failed: {}", name, e))
}

/// Compare `actual` with the golden file, or rewrite it in update mode.
fn check_golden(file_name: &str, actual: &str, same: impl Fn(&str, &str) -> bool) {
    let path = golden_output_dir().join(file_name);

    if update_mode() {
        fs::create_dir_all(golden_output_dir()).expect("failed to create golden output dir");
        fs::write(&path, actual).expect("failed to write golden file");
        eprintln!("Updated golden file: {}", path.display());
        return;
    }

    let expected = fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "missing golden file {} ({}); run with TUGSPAN_UPDATE_GOLDEN=1",
            path.display(),
            e
        )
    });

    if !same(&expected, actual) {
        panic!(
            "golden mismatch for {}:\n--- expected ---\n{}\n--- actual ---\n{}",
            file_name, expected, actual
        );
    }
}

fn check_fixture(name: &str) {
    let analysis = run_fixture(name);

    check_golden(&format!("{}.dump", name), &dump::render(&analysis), |expected, actual| {
        expected == actual
    });

    let json = serde_json::to_string_pretty(&analysis).expect("analysis serializes");
    check_golden(&format!("{}.json", name), &format!("{}\n", json), |expected, actual| {
        let expected: Value = serde_json::from_str(expected).expect("golden JSON parses");
        let actual: Value = serde_json::from_str(actual).expect("actual JSON parses");
        expected == actual
    });
}

// ============================================================================
// Golden Tests
// ============================================================================

#[test]
fn golden_module_comments() {
    check_fixture("module_comments");
}

#[test]
fn golden_crlf_and_sentinel() {
    check_fixture("crlf_and_sentinel");
}

#[test]
fn golden_skipped_tokens() {
    check_fixture("skipped_tokens");

    let analysis = run_fixture("skipped_tokens");
    assert_eq!(analysis.skipped_offsets(), vec![19, 40]);
}

#[test]
fn golden_cml_comments() {
    check_fixture("cml_comments");
}

#[test]
fn golden_char_columns() {
    check_fixture("char_columns");
}

#[test]
fn golden_fixtures_are_all_covered() {
    let mut names: Vec<String> = fs::read_dir(golden_fixtures_dir())
        .expect("fixtures dir exists")
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension()? != "json" {
                return None;
            }
            path.file_stem()?.to_str().map(str::to_string)
        })
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "char_columns",
            "cml_comments",
            "crlf_and_sentinel",
            "module_comments",
            "skipped_tokens",
        ]
    );
}
