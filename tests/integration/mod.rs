//! Integration tests for rs-textract
//!
//! These tests run complete documents through the extractor and check what
//! ends up in the post and comments sections.

mod edge_cases;
mod feature_combinations;
mod real_world_articles;

use rs_textract::{ExtractResult, Extractor, Options};

/// Read a fixture from `tests/integration/fixtures/`.
pub(crate) fn fixture(name: &str) -> String {
    let path = format!(
        "{}/tests/integration/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    );
    match std::fs::read_to_string(&path) {
        Ok(html) => html,
        Err(err) => panic!("cannot read fixture {path}: {err}"),
    }
}

/// Extract with a fresh extractor, failing the test on a fatal error.
pub(crate) fn extract_with(html: &str, options: Options) -> Option<ExtractResult> {
    match Extractor::new(options).extract(html, Some("fixture")) {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

/// Like [`extract_with`], but the record must produce output.
pub(crate) fn must_extract(html: &str, options: Options) -> ExtractResult {
    match extract_with(html, options) {
        Some(result) => result,
        None => panic!("expected a result, got no output"),
    }
}
