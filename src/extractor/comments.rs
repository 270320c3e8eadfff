//! Comment Extraction
//!
//! Comment regions are located with their own rule catalog and pruned with their
//! own discard rules. The first region that yields an accepted element is detached
//! from the document, so body extraction can never pick the discussion up again.
//! Block containers are never demoted to paragraphs here.

use tracing::debug;

use crate::etree::{NodeId, Tree};
use crate::html_processing::trim;
use crate::selector::{self, comments::COMMENTS_DISCARD_RULES, comments::COMMENTS_RULES};

use super::handlers::Context;
use super::pipeline::handle_text_elem;
use super::pruning::prune_unwanted_nodes;
use super::state::ExtractionState;
use super::tags::COMMENTS_BLACKLIST;

/// Process one comment element; account widgets are skipped.
fn process_comments_node(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    let new = handle_text_elem(tree, id, out, state, ctx)?;
    let text = trim(&out.text_content(new));
    if COMMENTS_BLACKLIST.contains(&text.as_str()) {
        return None;
    }
    out.clear_attrs(new);
    Some(new)
}

/// Try and extract comments out of potential sections of the document.
///
/// Returns the comments tree (root `body`) and its text. When
/// `include_comments` is off the region is still detached but nothing is
/// returned.
///
/// # Example
///
/// ```rust
/// use rs_textract::extractor::{comments::extract_comments, handlers::Context};
/// use rs_textract::lru::DuplicateCache;
/// use rs_textract::{dom, Options};
///
/// let mut tree = dom::parse(
///     r#"<article><p>Post.</p></article><div id="comments"><p>Great read!</p></div>"#,
/// );
/// let cache = DuplicateCache::default();
/// let opts = Options::default();
/// let (_, text) = extract_comments(&mut tree, Context::new(&cache, &opts));
/// assert_eq!(text, "Great read!");
/// assert!(!tree.text_content(tree.root()).contains("Great read!"));
/// ```
#[must_use]
pub fn extract_comments(tree: &mut Tree, ctx: Context<'_>) -> (Tree, String) {
    let mut out = Tree::new("body");
    let root = tree.root();
    let result_root = out.root();

    for (index, rule) in COMMENTS_RULES.iter().enumerate() {
        let Some(region) = selector::query(tree, root, rule) else {
            continue;
        };
        prune_unwanted_nodes(tree, region, COMMENTS_DISCARD_RULES);

        let mut state = ExtractionState::new();
        for id in tree.iter(region) {
            if state.is_done(id)
                || !tree.is_within(id, region)
                || !state.is_potential_tag(tree.tag(id))
            {
                continue;
            }
            if let Some(new) = process_comments_node(tree, id, &mut out, &mut state, ctx) {
                if id == region {
                    out.set_tail(new, None);
                }
                out.append(result_root, new);
            }
            state.mark_done(id);
        }

        if out.has_children(result_root) {
            debug!(rule = index, "comments region selected");
            tree.remove(region);
            break;
        }
    }

    if !ctx.opts.include_comments {
        return (Tree::new("body"), String::new());
    }
    let text = trim(&out.iter_text(result_root, " "));
    (out, text)
}
