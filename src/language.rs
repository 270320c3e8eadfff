//! Language identification.
//!
//! The orchestrator only needs a best guess and a confidence to reject documents
//! written in another language than the requested one. An identifier that cannot
//! decide returns `None`, and an undecided document is never rejected.

use crate::classifier::stoplists::{self, words, LANGUAGES};

/// Identifies the language of a text.
pub trait LanguageIdentifier: Send + Sync {
    /// ISO 639-1 code and confidence in `[0, 1]`, or `None` when undecided.
    fn identify(&self, text: &str) -> Option<(String, f64)>;
}

/// Guesses the language from the share of words found in each bundled stoplist.
///
/// # Example
///
/// ```rust
/// use rs_textract::language::{LanguageIdentifier, StoplistIdentifier};
///
/// let identifier = StoplistIdentifier::default();
/// let guess = identifier.identify("Das ist nicht so schwer, wie es aussieht, und wir haben es oft gemacht.");
/// assert_eq!(guess.map(|(code, _)| code), Some("de".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct StoplistIdentifier {
    /// Minimum stopword share for a decision.
    pub min_confidence: f64,
    /// Minimum number of words for a decision.
    pub min_words: usize,
}

impl Default for StoplistIdentifier {
    fn default() -> Self {
        Self {
            min_confidence: 0.05,
            min_words: 5,
        }
    }
}

impl LanguageIdentifier for StoplistIdentifier {
    fn identify(&self, text: &str) -> Option<(String, f64)> {
        let tokens: Vec<String> = words(text).collect();
        if tokens.len() < self.min_words {
            return None;
        }
        let mut best: Option<(&str, f64)> = None;
        for language in LANGUAGES {
            let Some(list) = stoplists::stoplist(language) else {
                continue;
            };
            let hits = tokens.iter().filter(|w| list.contains(w.as_str())).count();
            let share = hits as f64 / tokens.len() as f64;
            if best.is_none_or(|(_, top)| share > top) {
                best = Some((language, share));
            }
        }
        best.filter(|&(_, share)| share >= self.min_confidence)
            .map(|(language, share)| (language.to_string(), share))
    }
}

/// Whether a text may be kept for the requested `target` language.
///
/// Texts without a target, and texts the identifier cannot decide on, pass.
#[must_use]
pub fn language_filter(
    identifier: &dyn LanguageIdentifier,
    text: &str,
    target: Option<&str>,
) -> (bool, Option<String>) {
    let detected = identifier.identify(text).map(|(code, _)| code);
    let keep = match (target, detected.as_deref()) {
        (Some(target), Some(code)) => target.eq_ignore_ascii_case(code),
        _ => true,
    };
    (keep, detected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifies_bundled_languages() {
        let identifier = StoplistIdentifier::default();
        let cases = [
            ("en", "This is one of the best things that we have seen in the city for a long time."),
            ("fr", "Il est vrai que nous ne pouvons pas tout faire, mais nous avons fait de notre mieux."),
            ("de", "Wir haben uns sehr gefreut, dass so viele von euch bei dem Fest dabei waren."),
        ];
        for (expected, text) in cases {
            let guess = identifier.identify(text).map(|(code, _)| code);
            assert_eq!(guess.as_deref(), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_undecided() {
        let identifier = StoplistIdentifier::default();
        assert!(identifier.identify("Kupo").is_none());
        assert!(identifier.identify("Xylofoon kwartel zebra pyjama quiz wolk").is_none());
    }

    #[test]
    fn test_language_filter() {
        let identifier = StoplistIdentifier::default();
        let english = "This is one of the best things that we have seen in the city for a long time.";
        assert!(language_filter(&identifier, english, None).0);
        assert!(language_filter(&identifier, english, Some("en")).0);
        assert!(language_filter(&identifier, english, Some("EN")).0);
        let (keep, detected) = language_filter(&identifier, english, Some("de"));
        assert!(!keep);
        assert_eq!(detected.as_deref(), Some("en"));
        // Undecided text passes.
        assert!(language_filter(&identifier, "Kupo", Some("de")).0);
    }
}
