//! HTML Processing
//!
//! Loading, cleaning and normalizing the markup tree before extraction, plus the
//! text helpers shared by extraction and output:
//!
//! - [`load_html`] / [`load_bytes`]: parse markup into an element tree
//! - [`clean_tree`] and [`prune_empty`]: strip scripts, chrome and empty containers
//! - [`convert_tags`]: map the source vocabulary onto the output vocabulary
//! - [`trim`], [`sanitize`], [`text_filter`], [`text_chars_test`]

use crate::dom;
use crate::encoding;
use crate::error::{Error, Result};
use crate::etree::{NodeId, Tree};
use crate::extractor::tags::{
    Rendition, DEL_TAGS, EMPTY_TAGS_TO_REMOVE, HEAD_TAGS, ITEM_TAGS, LB_TAGS, LIST_TAGS,
    MERGE_TAGS, QUOTE_TAGS, TAGS_TO_KILL_SET, TAGS_TO_STRIP_SET,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Short boilerplate captions (sharing, login prompts, related-post teasers).
///
/// Matched against the start of each trimmed line.
#[allow(clippy::expect_used)]
static RE_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:Gef.llt mir|.hnliche Beitr|[Ss]hare (?:on|via)|Fill in your details below|Trage deine Daten unten|Kommentar verfassen|Bitte logge dich|Hinterlasse einen Kommentar|Connecting to %s|Verbinde mit %s|[Ss]imilar posts|[Rr]elated posts|Please log in|Facebook$|Twitter$|Google$|E-Mail$|Drucken$|LinkedIn$)",
    )
    .expect("valid regex")
});

/// Trailing tag clouds.
#[allow(clippy::expect_used)]
static RE_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tags: [A-ZÄÖÜßa-zäöü ,]+").expect("valid regex"));

/// Lines shorter than this are never filtered.
const MIN_FILTERED_LINE: usize = 5;

// === Loading ===

/// Parse markup into an element tree.
///
/// Fails with [`Error::Input`] when the markup is empty or carries no text at all.
pub fn load_html(html: &str) -> Result<Tree> {
    if html.trim().is_empty() {
        return Err(Error::Input("empty document".to_string()));
    }
    let tree = dom::parse(html);
    if tree.text_content(tree.root()).trim().is_empty() {
        return Err(Error::Input("document contains no text".to_string()));
    }
    Ok(tree)
}

/// Decode raw bytes (see [`encoding::decode_html`]) and parse them.
pub fn load_bytes(bytes: &[u8], content_type: Option<&str>) -> Result<Tree> {
    let html = encoding::decode_html(bytes, content_type)?;
    load_html(&html)
}

// === Cleaning ===

/// Remove the document-level `<head>` (title, meta, scripts).
///
/// The element shares its name with normalized headings, so it must be gone
/// before [`convert_tags`] runs on an uncleaned tree.
pub fn drop_document_head(tree: &mut Tree) {
    let root = tree.root();
    let heads: Vec<NodeId> = tree
        .children(root)
        .filter(|&id| tree.tag(id) == "head")
        .collect();
    for id in heads {
        tree.remove(id);
    }
}

/// Strip scripts, styles, media, forms and navigation chrome from the tree.
///
/// Killed elements disappear with their subtree but keep their tail; stripped
/// elements are unwrapped. Event handler attributes are dropped.
pub fn clean_tree(tree: &mut Tree) {
    let root = tree.root();
    let mut killed = 0usize;
    for id in tree.descendants(root) {
        if tree.is_within(id, root) && TAGS_TO_KILL_SET.contains(tree.tag(id)) {
            tree.remove(id);
            killed += 1;
        }
    }

    let mut stripped = 0usize;
    for id in tree.descendants(root) {
        if TAGS_TO_STRIP_SET.contains(tree.tag(id)) {
            tree.unwrap(id);
            stripped += 1;
        } else {
            tree.retain_attrs(id, |name| !name.starts_with("on"));
        }
    }
    debug!(killed, stripped, "cleaned tree");
}

/// Delete empty `div`, `p` and `section` elements, deepest first.
pub fn prune_empty(tree: &mut Tree) {
    let root = tree.root();
    for id in tree.descendants(root).into_iter().rev() {
        if EMPTY_TAGS_TO_REMOVE.contains(&tree.tag(id))
            && !tree.has_children(id)
            && tree.text(id).is_none_or(|t| t.trim().is_empty())
        {
            tree.remove(id);
        }
    }
}

// === Normalization ===

/// Map source markup onto the output vocabulary.
///
/// Running it again on its own output changes nothing.
///
/// # Example
///
/// ```rust
/// use rs_textract::{dom, html_processing};
///
/// let mut tree = dom::parse("<h2>Title</h2><p>A <strong>bold</strong> <span>move</span></p>");
/// let root = tree.root();
/// html_processing::convert_tags(&mut tree, root);
/// let tags: Vec<&str> = tree.descendants(root).into_iter().map(|id| tree.tag(id)).collect();
/// assert!(tags.contains(&"head"));
/// assert!(tags.contains(&"hi"));
/// assert!(!tags.contains(&"span"));
/// ```
pub fn convert_tags(tree: &mut Tree, scope: NodeId) {
    let mut merge = Vec::new();
    for id in tree.descendants(scope) {
        let tag = tree.tag(id);
        if LIST_TAGS.contains(&tag) {
            // Lists keep their attributes for the comment and discard rules.
            tree.set_tag(id, "list");
            continue;
        }
        let renamed = if HEAD_TAGS.contains(&tag) {
            Some("head")
        } else if LB_TAGS.contains(&tag) {
            Some("lb")
        } else if ITEM_TAGS.contains(&tag) {
            Some("item")
        } else if QUOTE_TAGS.contains(&tag) {
            Some("quote")
        } else {
            None
        };
        if let Some(new_tag) = renamed {
            tree.set_tag(id, new_tag);
            tree.clear_attrs(id);
            continue;
        }

        if let Some(rendition) = Rendition::for_emphasis(tag) {
            tree.set_tag(id, "hi");
            tree.clear_attrs(id);
            tree.set_attr(id, "rendition", rendition.as_str());
        } else if DEL_TAGS.contains(&tag) {
            tree.set_tag(id, "del");
            tree.clear_attrs(id);
            tree.set_attr(id, "rendition", Rendition::Overstrike.as_str());
        } else if MERGE_TAGS.contains(&tag) {
            tree.append_text(id, " ");
            merge.push(id);
        }
    }
    for id in merge {
        tree.unwrap(id);
    }
}

// === Text helpers ===

/// Collapse whitespace runs to single spaces and strip both ends.
#[must_use]
pub fn trim(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the text contains at least one word character.
#[must_use]
pub fn text_chars_test(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Whether the text is a known boilerplate caption.
#[must_use]
pub fn text_filter(text: &str) -> bool {
    for line in text.lines() {
        let line = line.trim();
        if line.chars().count() >= MIN_FILTERED_LINE && RE_FILTER.is_match(line) {
            return true;
        }
    }
    RE_TAGS.is_match(text)
}

/// Clean text for emission: normalize line endings, drop control characters
/// (tab and newline excepted), collapse whitespace within lines and drop blank
/// lines.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace("&#13;", "");
    let text: String = text
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect();
    text.lines()
        .map(trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
