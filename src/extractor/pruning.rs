//! Section pruning functions.
//!
//! The Pruner removes every subtree matched by a discard rule from a scope of the
//! live tree. Rules run in order, so later rules only see what earlier rules left.

use tracing::debug;

use crate::etree::{NodeId, Tree};
use crate::selector::{self, discard, precision, Rule};
use crate::Options;

/// Remove every descendant of `scope` that matches one of `rules`.
///
/// Tails of removed elements stay in the document. Returns the number of
/// subtrees removed.
///
/// # Example
///
/// ```rust
/// use rs_textract::dom;
/// use rs_textract::extractor::pruning::prune_unwanted_nodes;
/// use rs_textract::selector::discard::OVERALL_DISCARD_RULES;
///
/// let mut tree = dom::parse(r#"<div><p>keep</p><div class="sidebar">drop</div>tail</div>"#);
/// let root = tree.root();
/// assert_eq!(prune_unwanted_nodes(&mut tree, root, OVERALL_DISCARD_RULES), 1);
/// assert_eq!(tree.text_content(root), "keeptail");
/// ```
pub fn prune_unwanted_nodes(tree: &mut Tree, scope: NodeId, rules: &[Rule]) -> usize {
    let mut removed = 0;
    for rule in rules {
        for id in selector::query_all(tree, scope, rule) {
            // Nested matches go with their matched ancestor.
            if tree.is_within(id, scope) {
                tree.remove(id);
                removed += 1;
            }
        }
    }
    removed
}

/// Apply the discard rules for a body region: the overall rules, plus the teaser
/// and precision rules when `favor_precision` is set.
pub fn prune_unwanted_sections(tree: &mut Tree, scope: NodeId, opts: &Options) -> usize {
    let mut removed = prune_unwanted_nodes(tree, scope, discard::OVERALL_DISCARD_RULES);
    if opts.favor_precision {
        removed += prune_unwanted_nodes(tree, scope, precision::TEASER_DISCARD_RULES);
        removed += prune_unwanted_nodes(tree, scope, precision::PRECISION_DISCARD_RULES);
    }
    if removed > 0 {
        debug!(removed, "pruned discarded sections");
    }
    removed
}
