//! Element Tree (etree) Utilities
//!
//! An arena-backed element tree with lxml-style text/tail semantics. This model is
//! what the extraction heuristics reason about: every element carries
//!
//! - **Text**: text content BEFORE the first child element
//! - **Tail**: text content AFTER the element's closing tag, still inside the parent
//!
//! ```html
//! <div>
//!   TEXT HERE          <!-- This is div's "text" -->
//!   <span>inner</span>
//!   TAIL HERE          <!-- This is span's "tail" -->
//! </div>
//! ```
//!
//! Elements live in a `Vec` and are addressed by [`NodeId`]. Structural links
//! (parent, first/last child, previous/next sibling) are plain indices, so removing
//! an element mid-walk never invalidates the ids collected before the removal:
//! a detached element simply stops being reachable from the root.

/// Index of an element inside its [`Tree`].
///
/// Ids are only meaningful for the tree that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the element in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    tail: Option<String>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// A mutable, single-owner element tree.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

/// Iterator over the direct children of an element.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.node(id).next;
        Some(id)
    }
}

/// Appends `s` to an optional text slot, creating it when absent.
fn push_str(slot: &mut Option<String>, s: &str) {
    if s.is_empty() {
        return;
    }
    match slot {
        Some(existing) => existing.push_str(s),
        None => *slot = Some(s.to_string()),
    }
}

impl Tree {
    /// Create a tree holding a single root element.
    #[must_use]
    pub fn new(root_tag: &str) -> Self {
        let root = Node {
            tag: root_tag.to_string(),
            ..Node::default()
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // === Construction ===

    /// Create a detached element. Attach it with [`Tree::append`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        id
    }

    /// Create an element as the last child of `parent`.
    pub fn sub_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append(parent, id);
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    ///
    /// The child's tail travels with it.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.node(parent).last_child;
        {
            let node = self.node_mut(child);
            node.parent = Some(parent);
            node.prev = last;
            node.next = None;
        }
        match last {
            Some(last) => self.node_mut(last).next = Some(child),
            None => self.node_mut(parent).first_child = Some(child),
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Insert `node` immediately before `anchor` under the same parent.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
        let Some(parent) = self.node(anchor).parent else {
            return;
        };
        self.detach(node);
        let prev = self.node(anchor).prev;
        {
            let n = self.node_mut(node);
            n.parent = Some(parent);
            n.prev = prev;
            n.next = Some(anchor);
        }
        self.node_mut(anchor).prev = Some(node);
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(node),
            None => self.node_mut(parent).first_child = Some(node),
        }
    }

    /// Unlink an element from its parent. Its subtree and tail stay with it.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = self.node(id);
            (node.parent, node.prev, node.next)
        };
        let Some(parent) = parent else {
            return;
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.node_mut(parent).first_child = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.node_mut(parent).last_child = prev,
        }
        let node = self.node_mut(id);
        node.parent = None;
        node.prev = None;
        node.next = None;
    }

    /// Remove an element and its subtree, keeping its tail in the document.
    ///
    /// The tail is appended to the previous sibling's tail, or to the parent's
    /// text when the element is the first child.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        if let Some(tail) = self.node_mut(id).tail.take() {
            match self.node(id).prev {
                Some(prev) => push_str(&mut self.node_mut(prev).tail, &tail),
                None => push_str(&mut self.node_mut(parent).text, &tail),
            }
        }
        self.detach(id);
    }

    /// Remove the element but keep its content: its text, children and tail are
    /// spliced into the parent at the element's position.
    pub fn unwrap(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        let prev = self.node(id).prev;
        let text = self.node_mut(id).text.take();
        let tail = self.node_mut(id).tail.take();

        if let Some(text) = text {
            match prev {
                Some(prev) => push_str(&mut self.node_mut(prev).tail, &text),
                None => push_str(&mut self.node_mut(parent).text, &text),
            }
        }

        let children: Vec<NodeId> = self.children(id).collect();
        for &child in &children {
            self.insert_before(id, child);
        }

        if let Some(tail) = tail {
            match children.last().copied().or(prev) {
                Some(anchor) => push_str(&mut self.node_mut(anchor).tail, &tail),
                None => push_str(&mut self.node_mut(parent).text, &tail),
            }
        }
        self.detach(id);
    }

    /// Unwrap every descendant of `scope` whose tag is in `tags`.
    pub fn strip_tags(&mut self, scope: NodeId, tags: &[&str]) {
        for id in self.descendants(scope) {
            if tags.contains(&self.tag(id)) {
                self.unwrap(id);
            }
        }
    }

    /// Deep-copy an element (with its tail) from another tree into this one.
    ///
    /// The copy is detached.
    pub fn import(&mut self, src: &Tree, id: NodeId) -> NodeId {
        let copy = self.create_element(src.tag(id));
        {
            let from = src.node(id);
            let node = self.node_mut(copy);
            node.attrs.clone_from(&from.attrs);
            node.text.clone_from(&from.text);
            node.tail.clone_from(&from.tail);
        }
        for child in src.children(id) {
            let child_copy = self.import(src, child);
            self.append(copy, child_copy);
        }
        copy
    }

    // === Tag and attributes ===

    #[must_use]
    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    pub fn set_tag(&mut self, id: NodeId, tag: &str) {
        tag.clone_into(&mut self.node_mut(id).tag);
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        &self.node(id).attrs
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let attrs = &mut self.node_mut(id).attrs;
        match attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.node_mut(id).attrs.retain(|(key, _)| key != name);
    }

    pub fn clear_attrs(&mut self, id: NodeId) {
        self.node_mut(id).attrs.clear();
    }

    /// Keep only the attributes for which `keep` returns true.
    pub fn retain_attrs<F: FnMut(&str) -> bool>(&mut self, id: NodeId, mut keep: F) {
        self.node_mut(id).attrs.retain(|(key, _)| keep(key));
    }

    // === Text and tail ===

    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    #[must_use]
    pub fn tail(&self, id: NodeId) -> Option<&str> {
        self.node(id).tail.as_deref()
    }

    pub fn set_text(&mut self, id: NodeId, text: Option<String>) {
        self.node_mut(id).text = text;
    }

    pub fn set_tail(&mut self, id: NodeId, tail: Option<String>) {
        self.node_mut(id).tail = tail;
    }

    pub fn take_tail(&mut self, id: NodeId) -> Option<String> {
        self.node_mut(id).tail.take()
    }

    /// Append raw text to the element's text slot.
    pub fn append_text(&mut self, id: NodeId, text: &str) {
        push_str(&mut self.node_mut(id).text, text);
    }

    /// Append raw text to the element's tail slot.
    pub fn append_tail(&mut self, id: NodeId, tail: &str) {
        push_str(&mut self.node_mut(id).tail, tail);
    }

    // === Navigation ===

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[must_use]
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    #[must_use]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.node(id).first_child,
        }
    }

    #[must_use]
    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).first_child.is_some()
    }

    /// All descendants of `id` in document order, excluding `id` itself.
    ///
    /// The result is a snapshot: mutating the tree afterwards does not affect it.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut child = self.node(id).last_child;
        while let Some(c) = child {
            stack.push(c);
            child = self.node(c).prev;
        }
        while let Some(current) = stack.pop() {
            out.push(current);
            let mut child = self.node(current).last_child;
            while let Some(c) = child {
                stack.push(c);
                child = self.node(c).prev;
            }
        }
        out
    }

    /// `id` followed by its descendants, in document order.
    #[must_use]
    pub fn iter(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        out.extend(self.descendants(id));
        out
    }

    /// Whether `id` is currently reachable from `ancestor` (or is `ancestor`).
    #[must_use]
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.node(c).parent;
        }
        false
    }

    // === Text collection ===

    /// Collect the element's text, its descendants' text and their tails, in
    /// document order, joining non-empty pieces with `separator`.
    ///
    /// The element's own tail is not included.
    #[must_use]
    pub fn iter_text(&self, id: NodeId, separator: &str) -> String {
        let mut pieces: Vec<&str> = Vec::new();
        self.collect_text(id, &mut pieces);
        pieces.retain(|p| !p.is_empty());
        pieces.join(separator)
    }

    // A child's tail comes after the child's whole subtree.
    fn collect_text<'a>(&'a self, id: NodeId, pieces: &mut Vec<&'a str>) {
        if let Some(text) = self.text(id) {
            pieces.push(text);
        }
        for child in self.children(id) {
            self.collect_text(child, pieces);
            if let Some(tail) = self.tail(child) {
                pieces.push(tail);
            }
        }
    }

    /// Concatenated text of the element and its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.iter_text(id, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `<div>A<b>B</b>C<i>D</i>E</div>`
    fn sample() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new("div");
        let root = tree.root();
        tree.set_text(root, Some("A".into()));
        let b = tree.sub_element(root, "b");
        tree.set_text(b, Some("B".into()));
        tree.set_tail(b, Some("C".into()));
        let i = tree.sub_element(root, "i");
        tree.set_text(i, Some("D".into()));
        tree.set_tail(i, Some("E".into()));
        (tree, b, i)
    }

    #[test]
    fn test_text_content_follows_document_order() {
        let (tree, _, _) = sample();
        assert_eq!(tree.text_content(tree.root()), "ABCDE");
        assert_eq!(tree.iter_text(tree.root(), " "), "A B C D E");
    }

    #[test]
    fn test_nested_tail_follows_subtree() {
        let (mut tree, b, _) = sample();
        let inner = tree.sub_element(b, "u");
        tree.set_text(inner, Some("x".into()));
        tree.set_tail(inner, Some("y".into()));
        assert_eq!(tree.text_content(tree.root()), "ABxyCDE");
    }

    #[test]
    fn test_remove_moves_tail_to_previous_sibling() {
        let (mut tree, b, i) = sample();
        tree.remove(i);
        assert_eq!(tree.tail(b), Some("CE"));
        assert_eq!(tree.text_content(tree.root()), "ABCE");
    }

    #[test]
    fn test_remove_first_child_moves_tail_to_parent_text() {
        let (mut tree, b, _) = sample();
        tree.remove(b);
        assert_eq!(tree.text(tree.root()), Some("AC"));
        assert_eq!(tree.children(tree.root()).count(), 1);
    }

    #[test]
    fn test_unwrap_keeps_all_text() {
        let mut tree = Tree::new("p");
        let root = tree.root();
        tree.set_text(root, Some("one ".into()));
        let span = tree.sub_element(root, "span");
        tree.set_text(span, Some("two ".into()));
        let em = tree.sub_element(span, "em");
        tree.set_text(em, Some("three".into()));
        tree.set_tail(em, Some(" four".into()));
        tree.set_tail(span, Some(" five".into()));

        tree.unwrap(span);

        assert_eq!(tree.text(root), Some("one two "));
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![em]);
        assert_eq!(tree.tail(em), Some(" four five"));
        assert_eq!(tree.text_content(root), "one two three four five");
    }

    #[test]
    fn test_strip_tags_nested() {
        let mut tree = Tree::new("p");
        let root = tree.root();
        let outer = tree.sub_element(root, "span");
        tree.set_text(outer, Some("a".into()));
        let inner = tree.sub_element(outer, "span");
        tree.set_text(inner, Some("b".into()));
        tree.set_tail(outer, Some("c".into()));

        tree.strip_tags(root, &["span"]);

        assert!(!tree.has_children(root));
        assert_eq!(tree.text(root), Some("abc"));
    }

    #[test]
    fn test_descendants_snapshot_survives_removal() {
        let (mut tree, b, i) = sample();
        let snapshot = tree.descendants(tree.root());
        tree.remove(b);
        assert_eq!(snapshot, vec![b, i]);
        assert!(!tree.is_within(b, tree.root()));
        assert!(tree.is_within(i, tree.root()));
    }

    #[test]
    fn test_import_copies_subtree() {
        let (src, b, _) = sample();
        let mut dst = Tree::new("body");
        let copy = dst.import(&src, src.root());
        dst.append(dst.root(), copy);
        assert_eq!(dst.text_content(dst.root()), "ABCDE");
        // The source is untouched.
        assert_eq!(src.tail(b), Some("C"));
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut tree = Tree::new("div");
        let root = tree.root();
        tree.set_attr(root, "class", "a");
        tree.set_attr(root, "id", "x");
        tree.set_attr(root, "class", "b");
        assert_eq!(tree.attrs(root)[0], ("class".to_string(), "b".to_string()));
        tree.retain_attrs(root, |name| name == "id");
        assert_eq!(tree.attr(root, "class"), None);
        assert_eq!(tree.attr(root, "id"), Some("x"));
    }
}
