//! Structural validation and repair of the output document.
//!
//! Elements outside the output vocabulary are folded away: their text (with all
//! descendant text) and their tail join the previous sibling's tail, or the
//! parent's text when there is no previous sibling, and the element is dropped.
//! Attributes other than `rendition` are stripped from the remaining elements.
//!
//! Repair only moves text. The number of visible (non-whitespace) characters is
//! compared before and after; a difference is reported as
//! [`Error::TextLoss`](crate::Error::TextLoss).

use tracing::debug;

use crate::error::{Error, Result};
use crate::etree::{NodeId, Tree};
use crate::extractor::tags::{OUTPUT_ATTRIBUTES, OUTPUT_TAG_SET};

/// What a repair pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Elements folded into their surroundings.
    pub folded_elements: usize,
    /// Attributes removed from valid elements.
    pub stripped_attributes: usize,
}

impl RepairReport {
    /// Total number of repairs.
    #[must_use]
    pub fn total(&self) -> usize {
        self.folded_elements + self.stripped_attributes
    }
}

/// Number of non-whitespace characters under `id`.
#[must_use]
pub fn visible_len(tree: &Tree, id: NodeId) -> usize {
    tree.text_content(id)
        .chars()
        .filter(|c| !c.is_whitespace())
        .count()
}

fn join_space(existing: Option<&str>, addition: &str) -> String {
    match existing {
        Some(existing) if !existing.is_empty() => format!("{existing} {addition}"),
        _ => addition.to_string(),
    }
}

/// Fold an invalid element into its surroundings and detach it.
fn fold_element(tree: &mut Tree, id: NodeId) {
    let Some(parent) = tree.parent(id) else {
        return;
    };
    let text = tree.text_content(id);
    let tail = tree.take_tail(id).unwrap_or_default();
    let folded = [text.trim(), tail.trim()]
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if !folded.is_empty() {
        match tree.previous(id) {
            Some(prev) => {
                let joined = join_space(tree.tail(prev), &folded);
                tree.set_tail(prev, Some(joined));
            }
            None => {
                let joined = join_space(tree.text(parent), &folded);
                tree.set_text(parent, Some(joined));
            }
        }
    }
    tree.detach(id);
}

/// Repair every descendant of `scope` in place.
///
/// Running it again on its own output changes nothing.
///
/// # Example
///
/// ```rust
/// use rs_textract::etree::Tree;
/// use rs_textract::validation::validate_tree;
///
/// let mut tree = Tree::new("post");
/// let root = tree.root();
/// let p = tree.sub_element(root, "p");
/// tree.set_text(p, Some("kept".into()));
/// let span = tree.sub_element(root, "span");
/// tree.set_text(span, Some("folded".into()));
///
/// let report = validate_tree(&mut tree, root)?;
/// assert_eq!(report.folded_elements, 1);
/// assert_eq!(tree.tail(p), Some("folded"));
/// # Ok::<(), rs_textract::Error>(())
/// ```
pub fn validate_tree(tree: &mut Tree, scope: NodeId) -> Result<RepairReport> {
    let before = visible_len(tree, scope);
    let mut report = RepairReport::default();

    for id in tree.descendants(scope) {
        if !tree.is_within(id, scope) {
            continue;
        }
        if !OUTPUT_TAG_SET.contains(tree.tag(id)) {
            debug!(tag = tree.tag(id), "folding invalid element");
            fold_element(tree, id);
            report.folded_elements += 1;
            continue;
        }
        let invalid: Vec<String> = tree
            .attrs(id)
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| !OUTPUT_ATTRIBUTES.contains(&name.as_str()))
            .collect();
        for name in invalid {
            debug!(tag = tree.tag(id), attribute = %name, "stripping attribute");
            tree.remove_attr(id, &name);
            report.stripped_attributes += 1;
        }
    }

    let after = visible_len(tree, scope);
    if before != after {
        return Err(Error::TextLoss { before, after });
    }
    Ok(report)
}
