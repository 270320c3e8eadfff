//! Record orchestration.
//!
//! [`Extractor::extract`] runs one record through the whole pipeline:
//!
//! 1. size check and loading (unusable input yields no output)
//! 2. cleaning on a copy of the parsed tree, the original kept for recovery
//! 3. tag normalization
//! 4. comment extraction, which detaches the comment region
//! 5. body extraction
//! 6. arbitration against the fallback classifier
//! 7. recovery on the uncleaned tree when the body is still empty
//! 8. length and language checks
//! 9. structural repair, duplicate bookkeeping and serialization
//!
//! The duplicate cache is the only state shared between records. Share one
//! extractor (or one `Arc<DuplicateCache>`) across every worker of a run.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::classifier::{BoilerplateClassifier, JusTextClassifier};
use crate::dom;
use crate::error::{Error, Result};
use crate::etree::Tree;
use crate::extractor::fallback::{compare_extraction, last_resort, Arbitration};
use crate::extractor::handlers::Context;
use crate::extractor::{extract_comments, extract_content};
use crate::html_processing::{clean_tree, convert_tags, load_bytes, load_html, prune_empty, trim};
use crate::language::{language_filter, LanguageIdentifier, StoplistIdentifier};
use crate::lru::DuplicateCache;
use crate::options::Options;
use crate::output::OutputDocument;
use crate::result::{ExtractResult, ExtractionSource};

/// Runs records through the extraction pipeline.
///
/// # Example
///
/// ```rust
/// use rs_textract::{Extractor, Options, OutputFormat};
///
/// let paragraph = "The committee met on Tuesday and agreed on a new schedule for the \
///     spring term, which will start two weeks later than in previous years.";
/// let html = format!(
///     r#"<html><body><div class="entry-content"><p>{paragraph}</p><p>{paragraph} Again.</p></div></body></html>"#
/// );
/// let extractor = Extractor::new(Options {
///     output_format: OutputFormat::Xml,
///     ..Options::default()
/// });
/// let output = extractor.process_record(&html, Some("doc-1"))?;
/// assert!(output.is_some_and(|xml| xml.starts_with("<doc><post><p>The committee")));
/// # Ok::<(), rs_textract::Error>(())
/// ```
pub struct Extractor {
    options: Options,
    cache: Arc<DuplicateCache>,
    classifier: Box<dyn BoilerplateClassifier>,
    identifier: Box<dyn LanguageIdentifier>,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .field("cache_len", &self.cache.len())
            .field("classifier", &self.classifier.name())
            .finish_non_exhaustive()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Extractor {
    /// Create an extractor with its own duplicate cache sized from `options`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let cache = Arc::new(DuplicateCache::from_options(&options));
        Self::with_cache(options, cache)
    }

    /// Create an extractor that shares `cache` with other extractors of the
    /// same run.
    #[must_use]
    pub fn with_cache(options: Options, cache: Arc<DuplicateCache>) -> Self {
        Self {
            options,
            cache,
            classifier: Box::new(JusTextClassifier::default()),
            identifier: Box::new(StoplistIdentifier::default()),
        }
    }

    /// Replace the fallback classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn BoilerplateClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the language identifier.
    #[must_use]
    pub fn with_language_identifier(mut self, identifier: Box<dyn LanguageIdentifier>) -> Self {
        self.identifier = identifier;
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<DuplicateCache> {
        &self.cache
    }

    fn size_ok(&self, size: usize, record_id: Option<&str>) -> bool {
        let opts = &self.options;
        if size < opts.min_file_size || size > opts.max_file_size {
            warn!(
                record_id = record_id.unwrap_or_default(),
                size,
                min = opts.min_file_size,
                max = opts.max_file_size,
                "input size out of bounds"
            );
            return false;
        }
        true
    }

    /// Extract one record from markup.
    ///
    /// Returns `Ok(None)` when the record yields no output: unusable input, too
    /// little text or the wrong language. Fails only when repair would lose
    /// text.
    pub fn extract(&self, html: &str, record_id: Option<&str>) -> Result<Option<ExtractResult>> {
        if !self.size_ok(html.len(), record_id) {
            return Ok(None);
        }
        match load_html(html) {
            Ok(tree) => self.extract_tree(tree, record_id),
            Err(Error::Input(reason)) => {
                warn!(record_id = record_id.unwrap_or_default(), %reason, "unusable input");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Extract one record from raw bytes.
    ///
    /// `content_type` is an HTTP `Content-Type` value whose charset is used when
    /// the markup declares none. Fails with [`Error::Decode`] when the bytes
    /// cannot be decoded in their declared charset.
    pub fn extract_bytes(
        &self,
        bytes: &[u8],
        content_type: Option<&str>,
        record_id: Option<&str>,
    ) -> Result<Option<ExtractResult>> {
        if !self.size_ok(bytes.len(), record_id) {
            return Ok(None);
        }
        match load_bytes(bytes, content_type) {
            Ok(tree) => self.extract_tree(tree, record_id),
            Err(Error::Input(reason)) => {
                warn!(record_id = record_id.unwrap_or_default(), %reason, "unusable input");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Extract one record and serialize it in the configured output format.
    pub fn process_record(&self, html: &str, record_id: Option<&str>) -> Result<Option<String>> {
        match self.extract(html, record_id)? {
            Some(result) => result.serialize(self.options.output_format).map(Some),
            None => Ok(None),
        }
    }

    /// Byte-input counterpart of [`process_record`](Self::process_record).
    pub fn process_bytes(
        &self,
        bytes: &[u8],
        content_type: Option<&str>,
        record_id: Option<&str>,
    ) -> Result<Option<String>> {
        match self.extract_bytes(bytes, content_type, record_id)? {
            Some(result) => result.serialize(self.options.output_format).map(Some),
            None => Ok(None),
        }
    }

    fn extract_tree(&self, original: Tree, record_id: Option<&str>) -> Result<Option<ExtractResult>> {
        let opts = &self.options;
        let id = record_id.unwrap_or_default();
        let ctx = Context::new(&self.cache, opts);

        let mut tree = original.clone();
        clean_tree(&mut tree);
        prune_empty(&mut tree);
        let cleaned_html = if opts.no_fallback {
            String::new()
        } else {
            dom::to_html(&tree, tree.root())
        };
        let root = tree.root();
        convert_tags(&mut tree, root);

        let (comments_tree, comments_text) = extract_comments(&mut tree, ctx);
        let (mut body_tree, mut body_text) = extract_content(&mut tree, ctx);
        let mut source = ExtractionSource::Selectors;

        if !opts.no_fallback {
            let (tree, text, decision) =
                compare_extraction(self.classifier.as_ref(), &cleaned_html, (body_tree, body_text), ctx);
            body_tree = tree;
            body_text = text;
            if decision == Arbitration::Fallback {
                source = ExtractionSource::Fallback;
            }
        }

        if body_text.is_empty() {
            let (tree, text) = last_resort(&original, ctx);
            if !text.is_empty() {
                info!(record_id = id, len = text.chars().count(), "recovered body from uncleaned document");
                body_tree = tree;
                body_text = text;
                source = ExtractionSource::Recovery;
            }
        }

        let body_len = body_text.chars().count();
        let comments_len = comments_text.chars().count();
        if body_len < opts.min_extracted_size {
            error!(record_id = id, len = body_len, "not enough body text");
        }
        if opts.include_comments && comments_len < opts.min_extracted_comm_size {
            warn!(record_id = id, len = comments_len, "not enough comments text");
        }
        if body_len < opts.min_extracted_size && comments_len < opts.min_extracted_comm_size {
            return Ok(None);
        }

        let sample = if comments_len > body_len {
            &comments_text
        } else {
            &body_text
        };
        let (keep, language) = language_filter(
            self.identifier.as_ref(),
            sample,
            opts.target_language.as_deref(),
        );
        if !keep {
            warn!(
                record_id = id,
                detected = language.as_deref().unwrap_or_default(),
                target = opts.target_language.as_deref().unwrap_or_default(),
                "wrong language"
            );
            return Ok(None);
        }

        let mut document = OutputDocument::from_parts(&body_tree, &comments_tree);
        let report = document.validate()?;
        if report.total() > 0 {
            debug!(
                record_id = id,
                folded = report.folded_elements,
                stripped = report.stripped_attributes,
                "repaired output"
            );
        }
        self.observe(&document);

        Ok(Some(ExtractResult {
            body_text: document.post_text(),
            comments_text: document.comments_text(),
            document,
            source,
            record_id: record_id.map(str::to_string),
            language,
            repairs: report.total(),
        }))
    }

    /// Count every emitted block in the duplicate cache.
    fn observe(&self, document: &OutputDocument) {
        let tree = document.tree();
        for section in [document.post(), document.comments()] {
            for child in tree.children(section) {
                self.cache.observe(&trim(&tree.text_content(child)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifiedBlock;
    use crate::OutputFormat;

    struct Nothing;

    impl BoilerplateClassifier for Nothing {
        fn name(&self) -> &'static str {
            "nothing"
        }

        fn classify(&self, _html: &str, _stoplist: &str) -> Result<Vec<ClassifiedBlock>> {
            Ok(Vec::new())
        }
    }

    const SENTENCE: &str = "The river authority published its yearly report on water quality \
        and found that most of the monitored stretches have improved since last summer.";

    fn article(paragraphs: usize) -> String {
        let body: String = (0..paragraphs)
            .map(|i| format!("<p>{SENTENCE} Section {i}.</p>"))
            .collect();
        format!(
            r#"<html><head><title>Report</title></head><body>
            <nav><a href="/">Home</a></nav>
            <div class="entry-content">{body}</div>
            </body></html>"#
        )
    }

    fn run(extractor: &Extractor, html: &str) -> Option<ExtractResult> {
        match extractor.extract(html, Some("test")) {
            Ok(result) => result,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_article_extracted() {
        let extractor = Extractor::default().with_classifier(Box::new(Nothing));
        let Some(result) = run(&extractor, &article(3)) else {
            panic!("expected a result");
        };
        assert_eq!(result.source, ExtractionSource::Selectors);
        assert!(result.body_text.starts_with("The river authority"));
        assert!(!result.body_text.contains("Home"));
        assert_eq!(result.document.tree().children(result.document.post()).count(), 3);
        assert_eq!(result.record_id.as_deref(), Some("test"));
    }

    #[test]
    fn test_unusable_input_yields_nothing() {
        let extractor = Extractor::default();
        assert!(run(&extractor, "").is_none());
        assert!(run(&extractor, "<p>x</p>").is_none());
        assert!(run(&extractor, "<html><body>   </body></html>").is_none());

        let small = Extractor::new(Options {
            max_file_size: 100,
            ..Options::default()
        });
        assert!(run(&small, &article(3)).is_none());
    }

    #[test]
    fn test_short_text_yields_nothing() {
        let extractor = Extractor::default().with_classifier(Box::new(Nothing));
        let html = r#"<html><body><div class="entry-content"><p>Too short to keep.</p></div></body></html>"#;
        assert!(run(&extractor, html).is_none());
    }

    #[test]
    fn test_language_mismatch_yields_nothing() {
        let extractor = Extractor::new(Options {
            target_language: Some("de".to_string()),
            no_fallback: true,
            ..Options::default()
        });
        assert!(run(&extractor, &article(3)).is_none());

        let english = Extractor::new(Options {
            target_language: Some("en".to_string()),
            no_fallback: true,
            ..Options::default()
        });
        match run(&english, &article(3)) {
            Some(result) => assert_eq!(result.language.as_deref(), Some("en")),
            None => panic!("expected a result"),
        }
    }

    struct Fixed(&'static str);

    impl LanguageIdentifier for Fixed {
        fn identify(&self, _text: &str) -> Option<(String, f64)> {
            Some((self.0.to_string(), 1.0))
        }
    }

    #[test]
    fn test_custom_language_identifier() {
        let options = Options {
            target_language: Some("fr".to_string()),
            no_fallback: true,
            ..Options::default()
        };
        let extractor = Extractor::new(options).with_language_identifier(Box::new(Fixed("fr")));
        match run(&extractor, &article(3)) {
            Some(result) => assert_eq!(result.language.as_deref(), Some("fr")),
            None => panic!("expected a result"),
        }
    }

    #[test]
    fn test_emitted_blocks_are_observed() {
        let extractor = Extractor::new(Options {
            no_fallback: true,
            ..Options::default()
        });
        assert!(run(&extractor, &article(3)).is_some());
        let first = format!("{SENTENCE} Section 0.");
        assert_eq!(extractor.cache().count(&first), 1);
    }

    #[test]
    fn test_process_record_formats() {
        let extractor = Extractor::new(Options {
            no_fallback: true,
            output_format: OutputFormat::Json,
            ..Options::default()
        });
        match extractor.process_record(&article(2), Some("rec-7")) {
            Ok(Some(json)) => {
                assert!(json.contains(r#""source":"rec-7""#));
                assert!(json.contains(r#""extraction":"selectors""#));
            }
            Ok(None) => panic!("expected output"),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_bytes_input() {
        let extractor = Extractor::new(Options {
            no_fallback: true,
            ..Options::default()
        });
        let html = article(3).replace("<head>", "<head><meta charset=\"windows-1252\">");
        match extractor.extract_bytes(html.as_bytes(), None, None) {
            Ok(Some(result)) => assert!(result.body_text.contains("river authority")),
            Ok(None) => panic!("expected output"),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }
}
