//! Configuration options for content extraction.
//!
//! The `Options` struct controls extraction behavior: which sections are emitted,
//! the output format, and every numeric threshold the heuristics use. Options can
//! be loaded from a JSON file where missing fields keep their defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialization of an extracted document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Flattened, sanitized plain text.
    #[default]
    Txt,
    /// Structured markup with `post` and `comments` sections.
    Xml,
    /// Structured markup wrapped in a TEI document.
    XmlTei,
    /// JSON object with text fields and extraction metadata.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" | "plain" => Ok(Self::Txt),
            "xml" => Ok(Self::Xml),
            "xmltei" | "tei" => Ok(Self::XmlTei),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_textract::{Options, OutputFormat};
///
/// let options = Options {
///     include_comments: false,
///     output_format: OutputFormat::Xml,
///     ..Options::default()
/// };
/// assert_eq!(options.min_extracted_size, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Emit the comments section.
    ///
    /// The comment region is detached from the body either way, so disabling
    /// this never lets comments leak into the main text.
    ///
    /// Default: `true`
    pub include_comments: bool,

    /// Skip the fallback classifier and trust hand extraction unconditionally.
    ///
    /// Default: `false`
    pub no_fallback: bool,

    /// Additionally prune teaser and low-precision regions (related links,
    /// bylines, subscription boxes) from the body region.
    ///
    /// Default: `false`
    pub favor_precision: bool,

    /// Expected language (ISO 639-1 code). Documents identified as another
    /// language yield no output.
    ///
    /// Default: `None`
    pub target_language: Option<String>,

    /// Output serialization.
    ///
    /// Default: `OutputFormat::Txt`
    pub output_format: OutputFormat,

    /// Minimum body text length (characters) for a usable document.
    ///
    /// Default: `200`
    pub min_extracted_size: usize,

    /// Minimum comments text length (characters) for a usable document.
    ///
    /// Default: `100`
    pub min_extracted_comm_size: usize,

    /// Texts shorter than this are neither counted nor suppressed by the
    /// duplicate cache.
    ///
    /// Default: `100`
    pub min_duplcheck_size: usize,

    /// A text seen more than this many times in the run is suppressed.
    ///
    /// Default: `2`
    pub max_duplicate_count: usize,

    /// Maximum number of distinct texts held by the duplicate cache.
    ///
    /// Default: `10_000_000`
    pub dedup_cache_size: usize,

    /// Minimum tail length (characters, trimmed) that may be promoted into an
    /// element without text of its own.
    ///
    /// Default: `2`
    pub min_tail_size: usize,

    /// Hand extraction shorter than this may be overruled by the fallback.
    ///
    /// Default: `300`
    pub fallback_max_hand_size: usize,

    /// The fallback wins when its text is more than this many times longer
    /// than the hand extraction.
    ///
    /// Default: `2.0`
    pub fallback_ratio: f64,

    /// Also trust a non-empty fallback when the hand extraction holds no
    /// paragraph at all, whatever its length.
    ///
    /// Default: `false`
    pub fallback_without_paragraphs: bool,

    /// Stoplist language handed to the fallback classifier.
    ///
    /// Default: `"de"`
    pub stoplist: String,

    /// Inputs smaller than this (bytes) are unusable.
    ///
    /// Default: `10`
    pub min_file_size: usize,

    /// Inputs larger than this (bytes) are unusable.
    ///
    /// Default: `20_000_000`
    pub max_file_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include_comments: true,
            no_fallback: false,
            favor_precision: false,
            target_language: None,
            output_format: OutputFormat::Txt,
            min_extracted_size: 200,
            min_extracted_comm_size: 100,
            min_duplcheck_size: 100,
            max_duplicate_count: 2,
            dedup_cache_size: 10_000_000,
            min_tail_size: 2,
            fallback_max_hand_size: 300,
            fallback_ratio: 2.0,
            fallback_without_paragraphs: false,
            stoplist: "de".to_string(),
            min_file_size: 10,
            max_file_size: 20_000_000,
        }
    }
}

impl Options {
    /// Parse options from a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}
