//! Result types for extraction output.
//!
//! An [`ExtractResult`] holds the validated output document of one record
//! together with what the orchestrator learned while producing it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::OutputFormat;
use crate::output::OutputDocument;

/// Which extraction path produced the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    /// Selector-based region extraction.
    #[default]
    Selectors,
    /// The statistical classifier won arbitration.
    Fallback,
    /// Re-extraction on the uncleaned document after both came back empty.
    Recovery,
}

/// Result of processing one record.
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// Validated output document with `post` and `comments` sections.
    pub document: OutputDocument,

    /// Body text, whitespace-normalized.
    pub body_text: String,

    /// Comments text, whitespace-normalized. Empty when comments are disabled
    /// or none were found.
    pub comments_text: String,

    /// Extraction path that produced the body.
    pub source: ExtractionSource,

    /// Caller-supplied record identifier, echoed into JSON output.
    pub record_id: Option<String>,

    /// Language detected on the longer of body and comments.
    pub language: Option<String>,

    /// Number of repairs the structural validator performed.
    pub repairs: usize,
}

/// JSON shape of a result.
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    source: Option<&'a str>,
    language: Option<&'a str>,
    extraction: ExtractionSource,
    text: &'a str,
    comments: &'a str,
}

impl ExtractResult {
    /// Number of whitespace-separated tokens in the body.
    #[must_use]
    pub fn body_tokens(&self) -> usize {
        self.body_text.split_whitespace().count()
    }

    /// Number of whitespace-separated tokens in the comments.
    #[must_use]
    pub fn comments_tokens(&self) -> usize {
        self.comments_text.split_whitespace().count()
    }

    /// Serialize the result in `format`.
    pub fn serialize(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Txt => Ok(self.document.to_txt()),
            OutputFormat::Xml => Ok(self.document.to_xml()),
            OutputFormat::XmlTei => Ok(self.document.to_tei()),
            OutputFormat::Json => self.to_json(),
        }
    }

    fn to_json(&self) -> Result<String> {
        let record = JsonRecord {
            source: self.record_id.as_deref(),
            language: self.language.as_deref(),
            extraction: self.source,
            text: &self.body_text,
            comments: &self.comments_text,
        };
        serde_json::to_string(&record).map_err(|e| Error::Serialize(e.to_string()))
    }
}
