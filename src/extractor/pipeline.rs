//! Content extraction pipeline.
//!
//! Orchestrates region selection, pruning and the element walk for the body role:
//!
//! 1. Body rules are tried in priority order; the first match of a rule is the
//!    candidate region.
//! 2. The region is pruned in place with the discard rules.
//! 3. Its elements are dispatched to the handlers in document order.
//! 4. The first rule producing an accepted element wins. When none does, every
//!    paragraph of the pruned document is considered ([`recover_wild_text`]).

use tracing::{debug, info};

use crate::etree::{NodeId, Tree};
use crate::html_processing::trim;
use crate::selector::{self, content::BODY_RULES};

use super::handlers::{
    handle_code_blocks, handle_deletions, handle_line_breaks, handle_lists, handle_orphan_items,
    handle_paragraphs, handle_quotes, handle_titles, Context,
};
use super::pruning::prune_unwanted_sections;
use super::state::ExtractionState;
use super::tags::BLOCK_TAG_SET;

/// Dispatch one element of a region to its handler.
///
/// Returns the accepted element, built (detached) in `out`.
pub fn handle_text_elem(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    match tree.tag(id) {
        "list" => handle_lists(tree, id, out, state, ctx),
        "quote" => handle_quotes(tree, id, out, state, ctx),
        "code" => handle_code_blocks(tree, id, out, state, ctx),
        "head" => handle_titles(tree, id, out, state, ctx),
        "lb" => handle_line_breaks(tree, id, out, state, ctx),
        "del" => handle_deletions(tree, id, out, state, ctx),
        "item" => handle_orphan_items(tree, id, out, state, ctx),
        // Paragraphs and demoted block containers.
        _ => handle_paragraphs(tree, id, out, state, ctx),
    }
}

/// Whether the region holds at least one paragraph with text.
fn has_text_paragraph(tree: &Tree, region: NodeId) -> bool {
    tree.iter(region)
        .into_iter()
        .any(|id| tree.tag(id) == "p" && !tree.text_content(id).trim().is_empty())
}

/// Walk a region and append every accepted element to the root of `out`.
///
/// Returns the number of elements appended.
pub fn extract_region(
    tree: &mut Tree,
    region: NodeId,
    out: &mut Tree,
    ctx: Context<'_>,
) -> usize {
    let mut state = ExtractionState::new();
    if !has_text_paragraph(tree, region) {
        state.add_potential_tag("div");
    }
    let result_root = out.root();
    let mut appended = 0;
    for id in tree.iter(region) {
        if !tree.is_within(id, region) || state.is_done(id) {
            continue;
        }
        if !state.is_potential_tag(tree.tag(id)) {
            continue;
        }
        if BLOCK_TAG_SET.contains(tree.tag(id)) {
            tree.clear_attrs(id);
        }
        if let Some(new) = handle_text_elem(tree, id, out, &mut state, ctx) {
            if id == region {
                // Text after the region is not part of it.
                out.set_tail(new, None);
            }
            out.append(result_root, new);
            appended += 1;
        }
        state.mark_done(id);
    }
    appended
}

/// Last-resort wide net: prune the whole document and keep every acceptable
/// paragraph, ignoring the body rules.
pub fn recover_wild_text(tree: &mut Tree, out: &mut Tree, ctx: Context<'_>) -> usize {
    let root = tree.root();
    prune_unwanted_sections(tree, root, ctx.opts);
    let mut state = ExtractionState::new();
    let result_root = out.root();
    let mut appended = 0;
    for id in tree.descendants(root) {
        if tree.tag(id) != "p" || !tree.is_within(id, root) || state.is_done(id) {
            continue;
        }
        tree.clear_attrs(id);
        if let Some(new) = handle_paragraphs(tree, id, out, &mut state, ctx) {
            out.append(result_root, new);
            appended += 1;
        }
    }
    appended
}

/// Find the main content of a normalized document.
///
/// Returns the result tree (root `body`) and its text, whitespace-normalized.
/// The source tree is pruned in place.
///
/// # Example
///
/// ```rust
/// use rs_textract::extractor::{handlers::Context, pipeline::extract_content};
/// use rs_textract::lru::DuplicateCache;
/// use rs_textract::{dom, Options};
///
/// let mut tree = dom::parse(
///     r#"<div class="entry-content"><p>First paragraph.</p><div class="sidebar"><p>Popular</p></div></div>"#,
/// );
/// let cache = DuplicateCache::default();
/// let opts = Options::default();
/// let (body, text) = extract_content(&mut tree, Context::new(&cache, &opts));
/// assert_eq!(text, "First paragraph.");
/// assert_eq!(body.children(body.root()).count(), 1);
/// ```
#[must_use]
pub fn extract_content(tree: &mut Tree, ctx: Context<'_>) -> (Tree, String) {
    let mut out = Tree::new("body");
    let root = tree.root();

    for (index, rule) in BODY_RULES.iter().enumerate() {
        let Some(region) = selector::query(tree, root, rule) else {
            continue;
        };
        prune_unwanted_sections(tree, region, ctx.opts);
        if !tree.is_within(region, root) {
            continue;
        }
        if extract_region(tree, region, &mut out, ctx) > 0 {
            debug!(rule = index, "body region selected");
            break;
        }
    }

    if !out.has_children(out.root()) {
        let recovered = recover_wild_text(tree, &mut out, ctx);
        info!(recovered, "no body rule matched, recovered wild paragraphs");
    }

    let text = trim(&out.iter_text(out.root(), " "));
    (out, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::html_processing::convert_tags;
    use crate::lru::DuplicateCache;
    use crate::Options;

    fn extract(html: &str) -> (Tree, String) {
        let mut tree = dom::parse(html);
        let root = tree.root();
        convert_tags(&mut tree, root);
        let cache = DuplicateCache::default();
        let opts = Options::default();
        extract_content(&mut tree, Context::new(&cache, &opts))
    }

    fn tags(out: &Tree) -> Vec<&str> {
        out.children(out.root()).map(|id| out.tag(id)).collect()
    }

    #[test]
    fn test_first_rule_wins() {
        let (out, text) = extract(
            r#"<body><div class="entry-content"><h2>Title</h2><p>Body text.</p></div>
            <article><p>Other article text.</p></article></body>"#,
        );
        assert_eq!(tags(&out), vec!["head", "p"]);
        assert_eq!(text, "Title Body text.");
    }

    #[test]
    fn test_discarded_parts_never_appear() {
        let (_, text) = extract(
            r#"<body><article><p>Kept.</p><div class="share-buttons"><p>Share it</p></div>
            <p class="related-posts">More stories</p></article></body>"#,
        );
        assert_eq!(text, "Kept.");
    }

    #[test]
    fn test_divs_when_no_paragraphs() {
        let (out, text) = extract(
            r#"<body><div class="post-content"><div>Only div text here.</div><div>And more.</div></div></body>"#,
        );
        assert_eq!(tags(&out), vec!["p", "p"]);
        assert_eq!(text, "Only div text here. And more.");
    }

    #[test]
    fn test_divs_ignored_when_paragraphs_exist() {
        let (_, text) = extract(
            r#"<body><div class="post-content"><div>Loose div.</div><p>Paragraph.</p></div></body>"#,
        );
        assert_eq!(text, "Paragraph.");
    }

    #[test]
    fn test_line_break_tails_are_promoted() {
        let (out, text) = extract(
            r#"<body><article><div>intro<br>Second line of the text.<br>x</div><p>p</p></article></body>"#,
        );
        assert!(tags(&out).contains(&"p"));
        assert!(text.contains("Second line of the text."));
        assert!(!text.contains(" x"));
    }

    #[test]
    fn test_wild_text_recovery() {
        let (out, text) = extract(
            r#"<body><table><tr><td><p>Loose paragraph in a layout table.</p></td></tr></table>
            <div class="footer"><p>Footer text</p></div></body>"#,
        );
        assert_eq!(tags(&out), vec!["p"]);
        assert_eq!(text, "Loose paragraph in a layout table.");
    }

    #[test]
    fn test_empty_when_nothing_usable() {
        let (out, text) = extract("<body><div>---</div></body>");
        assert!(!out.has_children(out.root()));
        assert!(text.is_empty());
    }

    #[test]
    fn test_attributes_cleared_on_blocks() {
        let (out, _) = extract(
            r#"<body><article><p class="lead" data-x="1">Lead <i>paragraph</i>.</p></article></body>"#,
        );
        let Some(p) = out.children(out.root()).next() else {
            panic!("expected a paragraph");
        };
        assert!(out.attrs(p).is_empty());
        assert!(out
            .descendants(p)
            .into_iter()
            .all(|id| out.attrs(id).iter().all(|(name, _)| name == "rendition")));
    }
}
