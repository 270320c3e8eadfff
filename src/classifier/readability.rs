//! Readability-based classifier.
//!
//! `dom_smoothie` picks the article out of the page; every paragraph of the
//! article is content, everything it left out is boilerplate by omission.

use dom_smoothie::Readability;

use crate::error::{Error, Result};

use super::justext::JusTextClassifier;
use super::{BoilerplateClassifier, ClassifiedBlock};

/// Classifier backed by Mozilla's Readability algorithm (`dom_smoothie`).
#[derive(Debug, Clone, Default)]
pub struct ReadabilityClassifier;

impl BoilerplateClassifier for ReadabilityClassifier {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn classify(&self, html: &str, stoplist: &str) -> Result<Vec<ClassifiedBlock>> {
        if html.trim().is_empty() {
            return Err(Error::Classifier("empty document".to_string()));
        }
        let mut reader = Readability::new(html, None, None)
            .map_err(|err| Error::Classifier(err.to_string()))?;
        let article = reader
            .parse()
            .map_err(|err| Error::Classifier(err.to_string()))?;

        // Cut the article into blocks the same way the paragraph classifier does.
        let blocks = JusTextClassifier::default().classify(&article.content, stoplist)?;
        Ok(blocks
            .into_iter()
            .map(|block| ClassifiedBlock {
                is_boilerplate: false,
                ..block
            })
            .collect())
    }
}
