//! Statistical boilerplate classifiers.
//!
//! A classifier reads serialized markup and returns its text blocks in document
//! order, each flagged as boilerplate or content. The fallback adapter
//! (`extractor::fallback`) reassembles the content blocks and arbitrates against
//! the selector-based extraction.
//!
//! - [`JusTextClassifier`]: paragraph classification by length, link density and
//!   stopword density, revised by neighbouring paragraphs
//! - `ReadabilityClassifier` (feature `readability`): article detection with
//!   `dom_smoothie`

pub mod justext;
pub mod stoplists;

#[cfg(feature = "readability")]
pub mod readability;

use crate::error::Result;

pub use justext::JusTextClassifier;
#[cfg(feature = "readability")]
pub use readability::ReadabilityClassifier;

/// One text block of a classified document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBlock {
    /// Whitespace-normalized block text.
    pub text: String,
    /// Whether the classifier considers the block boilerplate.
    pub is_boilerplate: bool,
    /// Whether the block is a heading.
    pub is_heading: bool,
}

/// A statistical boilerplate classifier.
///
/// Implementations must be usable from several worker threads at once.
pub trait BoilerplateClassifier: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Classify the blocks of `html` using the stopwords of `stoplist`.
    fn classify(&self, html: &str, stoplist: &str) -> Result<Vec<ClassifiedBlock>>;
}
