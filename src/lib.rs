//! # rs-textract
//!
//! Main-content and comment extraction from web pages, for building text corpora.
//!
//! A page is parsed into an element tree, cleaned of scripts, navigation chrome
//! and media, and normalized onto a small output vocabulary (`p`, `head`, `list`,
//! `item`, `quote`, `hi`, ...). Ordered selector rules then pick the comment
//! region and the body region, discard rules prune boilerplate inside them, and
//! per-element heuristics decide what is kept. A statistical classifier serves
//! as a second opinion when the selectors found little, and a run-wide
//! duplicate cache suppresses text that keeps reappearing across pages.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_textract::{extract, Options};
//!
//! let paragraph = "Volunteers planted more than four hundred trees along the old \
//!     railway line this weekend, the largest community effort in the town so far.";
//! let html = format!(
//!     r#"<html><body><div class="entry-content"><p>{paragraph}</p><p>{paragraph}</p></div></body></html>"#
//! );
//!
//! match extract(&html, &Options::default())? {
//!     Some(result) => assert!(result.body_text.starts_with("Volunteers planted")),
//!     None => panic!("no usable content"),
//! }
//! # Ok::<(), rs_textract::Error>(())
//! ```
//!
//! ## Batch runs
//!
//! The duplicate cache only works when it spans a whole run. Build one
//! [`Extractor`] and share it (it is `Send + Sync`), or hand the same
//! `Arc<DuplicateCache>` to several extractors with [`Extractor::with_cache`].

mod error;
mod extract;
mod options;
mod result;

/// Arena element tree with text/tail slots.
pub mod etree;

/// Markup parsing into the element tree and HTML serialization.
pub mod dom;

/// Character encoding detection and decoding.
pub mod encoding;

/// Loading, cleaning, tag normalization and text helpers.
pub mod html_processing;

/// Run-wide duplicate text cache.
pub mod lru;

/// Region and discard rules.
pub mod selector;

/// Region extraction, pruning, comments and fallback arbitration.
pub mod extractor;

/// Statistical boilerplate classifiers.
pub mod classifier;

/// Language identification.
pub mod language;

/// Structural validation and repair.
pub mod validation;

/// Output document and serializers.
pub mod output;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::Extractor;
pub use lru::DuplicateCache;
pub use options::{Options, OutputFormat};
pub use output::OutputDocument;
pub use result::{ExtractResult, ExtractionSource};

/// Extracts one document with a fresh extractor.
///
/// Each call gets its own duplicate cache, so nothing is suppressed across
/// calls. Use an [`Extractor`] for batch runs.
pub fn extract(html: &str, options: &Options) -> Result<Option<ExtractResult>> {
    Extractor::new(options.clone()).extract(html, None)
}

/// Extracts one document from raw bytes with a fresh extractor.
///
/// The charset is taken from the markup's declaration, falling back to UTF-8.
///
/// # Example
///
/// ```rust
/// use rs_textract::{extract_bytes, Options};
///
/// let paragraph = "Caf\u{e9} owners in the old town have agreed to keep their terraces open \
///     until midnight during the summer festival, the council said on Monday.";
/// let mut html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><div class=\"entry-content\">".to_vec();
/// for _ in 0..2 {
///     html.extend_from_slice(b"<p>");
///     html.extend(paragraph.chars().map(|c| c as u8));
///     html.extend_from_slice(b"</p>");
/// }
/// html.extend_from_slice(b"</div></body></html>");
///
/// let result = extract_bytes(&html, &Options::default())?;
/// assert!(result.is_some_and(|r| r.body_text.starts_with("Café owners")));
/// # Ok::<(), rs_textract::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], options: &Options) -> Result<Option<ExtractResult>> {
    Extractor::new(options.clone()).extract_bytes(html, None, None)
}

/// Extracts one document and serializes it in `options.output_format`.
pub fn process_record(html: &str, options: &Options) -> Result<Option<String>> {
    Extractor::new(options.clone()).process_record(html, None)
}
