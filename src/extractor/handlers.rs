//! Element handlers.
//!
//! Handlers look at one element of a candidate region (the source tree) and build
//! its accepted counterpart in the result tree. A handler either returns the new,
//! still detached element or `None` when the source element is rejected. Every
//! source node a handler consumes is marked done so the region walk does not visit
//! it a second time.
//!
//! Acceptance is shared by all handlers: [`handle_text_node`] settles whether an
//! element has text at all (promoting its tail when it has none), [`accept_text`]
//! applies the boilerplate filter, the word-character test and the duplicate test.

use tracing::trace;

use crate::etree::{NodeId, Tree};
use crate::html_processing::{text_chars_test, text_filter, trim};
use crate::lru::DuplicateCache;
use crate::Options;

use super::state::ExtractionState;
use super::tags::{BLOCK_TAG_SET, INLINE_TAG_SET};

/// Shared read-only inputs of one extraction.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub cache: &'a DuplicateCache,
    pub opts: &'a Options,
}

impl<'a> Context<'a> {
    #[must_use]
    pub fn new(cache: &'a DuplicateCache, opts: &'a Options) -> Self {
        Self { cache, opts }
    }
}

/// Whether `text` was already seen more often than allowed in this run.
///
/// # Example
///
/// ```rust
/// use rs_textract::lru::DuplicateCache;
/// use rs_textract::extractor::handlers::duplicate_test;
/// use rs_textract::Options;
///
/// let cache = DuplicateCache::with_min_len(16, 4);
/// let opts = Options::default();
/// for _ in 0..3 {
///     assert!(!duplicate_test("Subscribe now", &cache, &opts));
///     cache.observe("Subscribe now");
/// }
/// assert!(duplicate_test("Subscribe now", &cache, &opts));
/// ```
#[must_use]
pub fn duplicate_test(text: &str, cache: &DuplicateCache, opts: &Options) -> bool {
    cache.count(text) > opts.max_duplicate_count
}

/// Make sure a source element has text of its own.
///
/// An element without text and without children takes over its tail when the
/// trimmed tail is at least `min_tail_size` characters long; a line break that
/// gains text this way becomes a paragraph. Returns `false` when the element has
/// nothing usable.
pub fn handle_text_node(tree: &mut Tree, id: NodeId, opts: &Options) -> bool {
    let has_text = tree.text(id).is_some_and(|t| !t.trim().is_empty());
    if has_text || tree.has_children(id) {
        return true;
    }
    let tail_len = tree.tail(id).map_or(0, |t| t.trim().chars().count());
    if tail_len == 0 || tail_len < opts.min_tail_size {
        return false;
    }
    let tail = tree.take_tail(id);
    tree.set_text(id, tail);
    if tree.tag(id) == "lb" {
        tree.set_tag(id, "p");
    }
    true
}

/// Apply the boilerplate filter, the word-character test and the duplicate test
/// to an element built in the result tree.
#[must_use]
pub fn accept_text(out: &Tree, id: NodeId, ctx: Context<'_>) -> bool {
    let text = trim(&out.text_content(id));
    if text.is_empty() || !text_chars_test(&text) {
        return false;
    }
    if text_filter(&text) {
        trace!(text = %text, "filtered boilerplate caption");
        return false;
    }
    if duplicate_test(&text, ctx.cache, ctx.opts) {
        trace!(text = %text, "suppressed duplicate");
        return false;
    }
    true
}

fn mark_subtree_done(tree: &Tree, id: NodeId, state: &mut ExtractionState) {
    for node in tree.iter(id) {
        state.mark_done(node);
    }
}

/// Give a result element the trimmed tail of its source element.
fn carry_tail(tree: &Tree, id: NodeId, out: &mut Tree, new: NodeId) {
    if let Some(tail) = tree.tail(id).map(trim).filter(|t| !t.is_empty()) {
        out.set_tail(new, Some(tail));
    }
}

fn append_loose_text(out: &mut Tree, parent: NodeId, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    let piece = format!(" {}", text.trim());
    match out.last_child(parent) {
        Some(last) => out.append_tail(last, &piece),
        None => out.append_text(parent, &piece),
    }
}

/// Copy the inline content of `src_id` (formatting, deletions, code, line breaks
/// and unknown inline leftovers) under `new_parent`.
///
/// Block children stay in the source for the region walk. A block the walk will
/// visit keeps its tail and emits it after itself; the tail of any other block
/// moves here.
pub(crate) fn copy_inline_children(
    tree: &mut Tree,
    src_id: NodeId,
    out: &mut Tree,
    new_parent: NodeId,
    state: &mut ExtractionState,
) {
    let children: Vec<NodeId> = tree.children(src_id).collect();
    for child in children {
        let tag = tree.tag(child);
        if BLOCK_TAG_SET.contains(tag) {
            if !state.is_potential_tag(tag) {
                if let Some(tail) = tree.take_tail(child) {
                    append_loose_text(out, new_parent, &tail);
                }
            }
            continue;
        }
        mark_subtree_done(tree, child, state);
        if tag == "lb"
            && tree.next(child).is_none()
            && !tree.tail(child).is_some_and(text_chars_test)
        {
            // Trailing break carries nothing.
            if let Some(tail) = tree.tail(child) {
                let tail = tail.to_string();
                append_loose_text(out, new_parent, &tail);
            }
            continue;
        }
        let copy = out.import(tree, child);
        if INLINE_TAG_SET.contains(tag) && tag != "lb" {
            out.retain_attrs(copy, |name| name == "rendition");
        }
        out.append(new_parent, copy);
    }
}

/// Build a flat block (`p`, `head`, `del`) from a source element's text and
/// inline content.
fn build_block(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    tag: &str,
) -> NodeId {
    let new = out.create_element(tag);
    if let Some(rendition) = tree.attr(id, "rendition") {
        let rendition = rendition.to_string();
        out.set_attr(new, "rendition", &rendition);
    }
    out.set_text(new, tree.text(id).map(str::to_string));
    copy_inline_children(tree, id, out, new, state);
    carry_tail(tree, id, out, new);
    state.mark_done(id);
    new
}

/// Paragraphs and demoted block containers.
pub fn handle_paragraphs(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    if !handle_text_node(tree, id, ctx.opts) {
        state.mark_done(id);
        return None;
    }
    let new = build_block(tree, id, out, state, "p");
    accept_text(out, new, ctx).then_some(new)
}

/// Headings keep their tag.
pub fn handle_titles(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    if !handle_text_node(tree, id, ctx.opts) {
        state.mark_done(id);
        return None;
    }
    let new = build_block(tree, id, out, state, "head");
    accept_text(out, new, ctx).then_some(new)
}

/// Block-level deleted text keeps its tag and rendition.
pub fn handle_deletions(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    if !handle_text_node(tree, id, ctx.opts) {
        state.mark_done(id);
        return None;
    }
    let new = build_block(tree, id, out, state, "del");
    accept_text(out, new, ctx).then_some(new)
}

/// Code blocks keep their whole text verbatim.
pub fn handle_code_blocks(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    mark_subtree_done(tree, id, state);
    let text = tree.text_content(id);
    if text.trim().is_empty() {
        return None;
    }
    let new = out.create_element("code");
    out.set_text(new, Some(text));
    carry_tail(tree, id, out, new);
    accept_text(out, new, ctx).then_some(new)
}

/// Line breaks standing on their own: the text following them becomes a
/// paragraph.
pub fn handle_line_breaks(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    state.mark_done(id);
    if !handle_text_node(tree, id, ctx.opts) || tree.tag(id) != "p" {
        return None;
    }
    let new = out.create_element("p");
    out.set_text(new, tree.text(id).map(str::to_string));
    carry_tail(tree, id, out, new);
    accept_text(out, new, ctx).then_some(new)
}

fn build_item(tree: &mut Tree, id: NodeId, out: &mut Tree, state: &mut ExtractionState) -> NodeId {
    let item = out.create_element("item");
    out.set_text(item, tree.text(id).map(str::to_string));
    let children: Vec<NodeId> = tree.children(id).collect();
    for child in children {
        let tag = tree.tag(child).to_string();
        match tag.as_str() {
            "list" => {
                let nested = build_list(tree, child, out, state);
                if out.has_children(nested) {
                    out.append(item, nested);
                } else if let Some(tail) = tree.tail(child).map(str::to_string) {
                    append_loose_text(out, item, &tail);
                }
            }
            tag if BLOCK_TAG_SET.contains(tag) => {
                let text = trim(&tree.iter_text(child, " "));
                append_loose_text(out, item, &text);
                if let Some(tail) = tree.tail(child).map(str::to_string) {
                    append_loose_text(out, item, &tail);
                }
                mark_subtree_done(tree, child, state);
            }
            _ => {
                let copy = out.import(tree, child);
                out.append(item, copy);
                mark_subtree_done(tree, child, state);
            }
        }
    }
    carry_tail(tree, id, out, item);
    state.mark_done(id);
    item
}

fn build_list(tree: &mut Tree, id: NodeId, out: &mut Tree, state: &mut ExtractionState) -> NodeId {
    let list = out.create_element("list");
    carry_tail(tree, id, out, list);
    state.mark_done(id);
    let children: Vec<NodeId> = tree.children(id).collect();
    for child in children {
        let item = build_item(tree, child, out, state);
        if text_chars_test(&out.text_content(item)) {
            out.append(list, item);
        }
    }
    list
}

/// Lists and their items, nested lists included.
pub fn handle_lists(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    let list = build_list(tree, id, out, state);
    if let Some(text) = tree.text(id).filter(|t| !t.trim().is_empty()) {
        let text = text.to_string();
        let first = out.create_element("item");
        out.set_text(first, Some(text));
        match out.children(list).next() {
            Some(anchor) => out.insert_before(anchor, first),
            None => out.append(list, first),
        }
    }
    (out.has_children(list) && accept_text(out, list, ctx)).then_some(list)
}

/// List items outside of a list become paragraphs.
pub fn handle_orphan_items(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    if !handle_text_node(tree, id, ctx.opts) {
        state.mark_done(id);
        return None;
    }
    let new = build_item(tree, id, out, state);
    out.set_tag(new, "p");
    accept_text(out, new, ctx).then_some(new)
}

/// Quotations: nested blocks become paragraphs inside the quote.
pub fn handle_quotes(
    tree: &mut Tree,
    id: NodeId,
    out: &mut Tree,
    state: &mut ExtractionState,
    ctx: Context<'_>,
) -> Option<NodeId> {
    let quote = out.create_element("quote");
    out.set_text(quote, tree.text(id).map(str::to_string));
    state.mark_done(id);
    let children: Vec<NodeId> = tree.children(id).collect();
    for child in children {
        let tag = tree.tag(child);
        if BLOCK_TAG_SET.contains(tag) {
            let p = out.sub_element(quote, "p");
            out.set_text(p, Some(trim(&tree.iter_text(child, " "))));
            if let Some(tail) = tree.tail(child).map(str::to_string) {
                append_loose_text(out, quote, &tail);
            }
        } else {
            let copy = out.import(tree, child);
            out.append(quote, copy);
        }
        mark_subtree_done(tree, child, state);
    }
    carry_tail(tree, id, out, quote);
    accept_text(out, quote, ctx).then_some(quote)
}
