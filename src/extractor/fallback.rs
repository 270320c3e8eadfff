//! Fallback extraction and arbitration.
//!
//! The statistical classifier gets the serialized cleaned document. Its content
//! blocks are rebuilt into the same shape as the selector-based result (a `body`
//! of `p` and `head` elements), with cross-page duplicates suppressed like in the
//! region walk. [`arbitrate`] then decides which result to trust, and
//! [`last_resort`] retries the selector walk on the uncleaned document when both
//! came back empty.

use tracing::{debug, info, warn};

use crate::classifier::BoilerplateClassifier;
use crate::etree::Tree;
use crate::html_processing::{convert_tags, drop_document_head, text_chars_test, trim};

use super::handlers::{duplicate_test, Context};
use super::pipeline::extract_content;

/// Which extraction won arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    Hand,
    Fallback,
}

/// Run the classifier over `html` and rebuild its content blocks.
///
/// A failing classifier yields an empty result.
#[must_use]
pub fn extract_with_classifier(
    classifier: &dyn BoilerplateClassifier,
    html: &str,
    ctx: Context<'_>,
) -> (Tree, String) {
    let mut out = Tree::new("body");
    let root = out.root();

    let blocks = match classifier.classify(html, &ctx.opts.stoplist) {
        Ok(blocks) => blocks,
        Err(err) => {
            warn!(classifier = classifier.name(), error = %err, "fallback classifier failed");
            return (out, String::new());
        }
    };

    for block in blocks.into_iter().filter(|b| !b.is_boilerplate) {
        let text = trim(&block.text);
        if !text_chars_test(&text) || duplicate_test(&text, ctx.cache, ctx.opts) {
            continue;
        }
        let tag = if block.is_heading { "head" } else { "p" };
        let element = out.sub_element(root, tag);
        out.set_text(element, Some(text));
    }

    let text = trim(&out.iter_text(root, " "));
    (out, text)
}

/// Decide between the hand-built extraction (length `hand_len`) and the
/// classifier's (length `fallback_len`).
///
/// The fallback wins only when the hand result is shorter than
/// `fallback_max_hand_size` and the fallback is more than `fallback_ratio`
/// times longer.
///
/// # Example
///
/// ```rust
/// use rs_textract::extractor::fallback::{arbitrate, Arbitration};
/// use rs_textract::Options;
///
/// let opts = Options::default();
/// assert_eq!(arbitrate(150, 400, &opts), Arbitration::Fallback);
/// assert_eq!(arbitrate(150, 250, &opts), Arbitration::Hand);
/// assert_eq!(arbitrate(350, 5000, &opts), Arbitration::Hand);
/// ```
#[must_use]
pub fn arbitrate(hand_len: usize, fallback_len: usize, opts: &crate::Options) -> Arbitration {
    if hand_len < opts.fallback_max_hand_size
        && fallback_len as f64 > opts.fallback_ratio * hand_len as f64
    {
        Arbitration::Fallback
    } else {
        Arbitration::Hand
    }
}

fn has_paragraph(tree: &Tree) -> bool {
    tree.iter(tree.root()).into_iter().any(|id| tree.tag(id) == "p")
}

/// Run the classifier and keep whichever result arbitration trusts.
///
/// With `fallback_without_paragraphs` set, a non-empty fallback also wins over
/// a hand extraction that holds no paragraph.
#[must_use]
pub fn compare_extraction(
    classifier: &dyn BoilerplateClassifier,
    html: &str,
    hand: (Tree, String),
    ctx: Context<'_>,
) -> (Tree, String, Arbitration) {
    let (fallback_tree, fallback_text) = extract_with_classifier(classifier, html, ctx);
    let hand_len = hand.1.chars().count();
    let fallback_len = fallback_text.chars().count();
    let mut decision = arbitrate(hand_len, fallback_len, ctx.opts);
    if decision == Arbitration::Hand
        && ctx.opts.fallback_without_paragraphs
        && fallback_len > 0
        && !has_paragraph(&hand.0)
    {
        decision = Arbitration::Fallback;
    }
    info!(hand_len, fallback_len, ?decision, "arbitration");
    match decision {
        Arbitration::Hand => (hand.0, hand.1, decision),
        Arbitration::Fallback => (fallback_tree, fallback_text, decision),
    }
}

/// Re-run the selector walk on the original, uncleaned document.
#[must_use]
pub fn last_resort(original: &Tree, ctx: Context<'_>) -> (Tree, String) {
    let mut tree = original.clone();
    drop_document_head(&mut tree);
    let root = tree.root();
    convert_tags(&mut tree, root);
    let (out, text) = extract_content(&mut tree, ctx);
    debug!(len = text.chars().count(), "last-resort extraction");
    (out, text)
}
