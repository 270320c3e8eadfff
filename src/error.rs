//! Error types for rs-textract.
//!
//! Only decoding failures and repair invariant violations are fatal for a
//! document. Every other problem (empty input, too little text, wrong language,
//! a failing fallback classifier) is logged and turns into "no output".

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input bytes could not be decoded in their declared charset.
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// Input is empty, too small or too large to process.
    #[error("Unusable input: {0}")]
    Input(String),

    /// The statistical boilerplate classifier rejected its input.
    #[error("Boilerplate classifier failed: {0}")]
    Classifier(String),

    /// Structural repair changed the amount of visible text.
    #[error("Repair lost text: {before} visible characters before, {after} after")]
    TextLoss { before: usize, after: usize },

    /// Configuration could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A result could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialize(String),

    /// A page could not be fetched.
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
