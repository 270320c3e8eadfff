//! Selector Infrastructure
//!
//! Selector and discard rules are plain data: a tag filter plus a list of
//! attribute patterns, any one of which makes the rule match. Rule lists are
//! ordered by priority; callers either take the first rule that yields a match
//! (region selection) or apply every rule in turn (pruning).

pub mod comments;
pub mod content;
pub mod discard;
pub mod precision;

pub mod utils;

use crate::etree::{NodeId, Tree};
pub use utils::{Attr, Pattern};

/// Tag filter of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tags {
    /// Any element.
    Any,
    /// Only elements whose tag is in the list.
    OneOf(&'static [&'static str]),
}

impl Tags {
    #[must_use]
    pub fn accepts(self, tag: &str) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(tags) => tags.contains(&tag),
        }
    }
}

/// A region or discard rule.
///
/// An element matches when its tag passes `tags` and at least one pattern
/// matches. A rule without patterns matches on tag identity alone.
///
/// # Example
///
/// ```rust
/// use rs_textract::dom;
/// use rs_textract::selector::{self, Attr, Pattern, Rule, Tags};
///
/// static ENTRY: Rule = Rule {
///     tags: Tags::OneOf(&["div"]),
///     patterns: &[Pattern::Contains(Attr::Class, "entry")],
/// };
///
/// let tree = dom::parse(r#"<div class="entry-content"><p>text</p></div>"#);
/// assert!(selector::query(&tree, tree.root(), &ENTRY).is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub tags: Tags,
    pub patterns: &'static [Pattern],
}

impl Rule {
    /// Whether the element matches this rule.
    #[must_use]
    pub fn matches(&self, tree: &Tree, id: NodeId) -> bool {
        if !self.tags.accepts(tree.tag(id)) {
            return false;
        }
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(tree, id))
    }
}

/// First descendant of `scope` (document order) matching `rule`.
#[must_use]
pub fn query(tree: &Tree, scope: NodeId, rule: &Rule) -> Option<NodeId> {
    tree.descendants(scope)
        .into_iter()
        .find(|&id| rule.matches(tree, id))
}

/// All descendants of `scope` matching `rule`, in document order.
///
/// Matches nested inside other matches are included.
#[must_use]
pub fn query_all(tree: &Tree, scope: NodeId, rule: &Rule) -> Vec<NodeId> {
    tree.descendants(scope)
        .into_iter()
        .filter(|&id| rule.matches(tree, id))
        .collect()
}
