//! DOM Adapter
//!
//! Bridges `dom_query` (html5ever) and the arena [`Tree`]: parsing converts the
//! html5ever node graph into elements with text/tail slots, serialization writes
//! a tree back out as HTML markup.
//!
//! Comments, doctypes and processing instructions are dropped during conversion.

use crate::etree::{NodeId, Tree};
use dom_query::{Document, NodeRef};

/// Nesting depth beyond which subtrees are flattened into plain text.
const MAX_TREE_DEPTH: usize = 256;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "lb", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Parse an HTML string into an element tree rooted at `html`.
///
/// Malformed markup never fails: html5ever always yields a best-effort document.
///
/// # Example
///
/// ```rust
/// use rs_textract::dom;
///
/// let tree = dom::parse("<p>Hello <b>world</b>!</p>");
/// assert_eq!(tree.tag(tree.root()), "html");
/// assert!(tree.text_content(tree.root()).contains("Hello world!"));
/// ```
#[must_use]
pub fn parse(html: &str) -> Tree {
    let doc = Document::from(html);
    let mut tree = Tree::new("html");
    let root = tree.root();

    let html_sel = doc.select("html");
    if let Some(node) = html_sel.nodes().first() {
        for attr in node.attrs().iter() {
            tree.set_attr(root, &attr.name.local, &attr.value);
        }
        convert_children(&mut tree, root, node, 1);
    }
    tree
}

fn convert_children(tree: &mut Tree, parent: NodeId, node: &NodeRef, depth: usize) {
    let mut last: Option<NodeId> = None;
    for child in node.children() {
        if child.is_element() {
            let tag = child
                .node_name()
                .map(|name| name.to_ascii_lowercase())
                .unwrap_or_default();
            if depth >= MAX_TREE_DEPTH {
                let text = child.text();
                match last {
                    Some(prev) => tree.append_tail(prev, &text),
                    None => tree.append_text(parent, &text),
                }
                continue;
            }
            let id = tree.sub_element(parent, &tag);
            for attr in child.attrs().iter() {
                tree.set_attr(id, &attr.name.local, &attr.value);
            }
            convert_children(tree, id, &child, depth + 1);
            last = Some(id);
        } else if child.is_text() {
            let text = child.text();
            match last {
                Some(prev) => tree.append_tail(prev, &text),
                None => tree.append_text(parent, &text),
            }
        }
    }
}

/// Escape text content for markup output.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for double-quoted markup output.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Serialize an element and its subtree as HTML (the element's tail excluded).
#[must_use]
pub fn to_html(tree: &Tree, id: NodeId) -> String {
    let mut out = String::new();
    write_html(tree, id, &mut out);
    out
}

fn write_html(tree: &Tree, id: NodeId, out: &mut String) {
    let tag = tree.tag(id);
    out.push('<');
    out.push_str(tag);
    for (name, value) in tree.attrs(id) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&tag) && !tree.has_children(id) && tree.text(id).is_none() {
        return;
    }
    if let Some(text) = tree.text(id) {
        out.push_str(&escape_text(text));
    }
    for child in tree.children(id) {
        write_html(tree, child, out);
        if let Some(tail) = tree.tail(child) {
            out.push_str(&escape_text(tail));
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
