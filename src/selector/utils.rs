//! Attribute patterns used by selector rules.

use crate::etree::{NodeId, Tree};

/// Attributes that rules inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Id,
    Class,
    Role,
    ItemProp,
    Style,
    Hidden,
    AriaHidden,
    DataComponent,
    DataLpReplacementContent,
}

impl Attr {
    /// Markup name of the attribute.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Class => "class",
            Self::Role => "role",
            Self::ItemProp => "itemprop",
            Self::Style => "style",
            Self::Hidden => "hidden",
            Self::AriaHidden => "aria-hidden",
            Self::DataComponent => "data-component",
            Self::DataLpReplacementContent => "data-lp-replacement-content",
        }
    }
}

/// A single predicate over an element's tag or attributes.
///
/// Patterns on an absent attribute never match, except [`Pattern::Present`]
/// which tests exactly that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Attribute value contains the needle.
    Contains(Attr, &'static str),
    /// Lowercased attribute value contains the (lowercase) needle.
    ContainsFolded(Attr, &'static str),
    /// Attribute value starts with the prefix.
    StartsWith(Attr, &'static str),
    /// Lowercased attribute value starts with the (lowercase) prefix.
    StartsWithFolded(Attr, &'static str),
    /// Attribute value equals the string.
    Equals(Attr, &'static str),
    /// Attribute is present, whatever its value.
    Present(Attr),
    /// Element tag equals the string.
    Tag(&'static str),
}

impl Pattern {
    #[must_use]
    pub fn matches(&self, tree: &Tree, id: NodeId) -> bool {
        match *self {
            Self::Contains(attr, needle) => value(tree, id, attr).is_some_and(|v| v.contains(needle)),
            Self::ContainsFolded(attr, needle) => {
                value(tree, id, attr).is_some_and(|v| v.to_lowercase().contains(needle))
            }
            Self::StartsWith(attr, prefix) => {
                value(tree, id, attr).is_some_and(|v| v.starts_with(prefix))
            }
            Self::StartsWithFolded(attr, prefix) => {
                value(tree, id, attr).is_some_and(|v| v.to_lowercase().starts_with(prefix))
            }
            Self::Equals(attr, expected) => value(tree, id, attr) == Some(expected),
            Self::Present(attr) => value(tree, id, attr).is_some(),
            Self::Tag(tag) => tree.tag(id) == tag,
        }
    }
}

/// Value of a rule attribute on an element.
#[inline]
#[must_use]
pub fn value(tree: &Tree, id: NodeId, attr: Attr) -> Option<&str> {
    tree.attr(id, attr.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(attrs: &[(&str, &str)]) -> (Tree, NodeId) {
        let mut tree = Tree::new("html");
        let id = tree.sub_element(tree.root(), "div");
        for (name, value) in attrs {
            tree.set_attr(id, name, value);
        }
        (tree, id)
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let (tree, id) = element(&[("class", "ArticleBody")]);
        assert!(!Pattern::Contains(Attr::Class, "articlebody").matches(&tree, id));
        assert!(Pattern::ContainsFolded(Attr::Class, "articlebody").matches(&tree, id));
    }

    #[test]
    fn test_starts_with_and_equals() {
        let (tree, id) = element(&[("id", "comments-area")]);
        assert!(Pattern::StartsWith(Attr::Id, "comments").matches(&tree, id));
        assert!(!Pattern::StartsWith(Attr::Id, "area").matches(&tree, id));
        assert!(!Pattern::Equals(Attr::Id, "comments").matches(&tree, id));
        assert!(Pattern::Equals(Attr::Id, "comments-area").matches(&tree, id));
    }

    #[test]
    fn test_absent_attribute_never_matches() {
        let (tree, id) = element(&[]);
        assert!(!Pattern::Contains(Attr::Class, "").matches(&tree, id));
        assert!(!Pattern::Present(Attr::Hidden).matches(&tree, id));
        assert!(Pattern::Tag("div").matches(&tree, id));
    }

    #[test]
    fn test_present() {
        let (tree, id) = element(&[("data-lp-replacement-content", "")]);
        assert!(Pattern::Present(Attr::DataLpReplacementContent).matches(&tree, id));
    }
}
