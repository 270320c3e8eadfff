//! Output document and serializers.
//!
//! The output document is a tree rooted at `doc` with two sections, `post` and
//! `comments`, holding elements of the closed output vocabulary. It serializes
//! as:
//!
//! - structured XML: `<doc><post>…</post><comments>…</comments></doc>`
//! - TEI XML: both sections as `text` elements of a TEI group
//! - flattened text: block elements on their own lines, sanitized

use crate::dom::{escape_attr, escape_text};
use crate::error::Result;
use crate::etree::{NodeId, Tree};
use crate::extractor::tags::NEWLINE_TAGS;
use crate::html_processing::{sanitize, trim};
use crate::validation::{validate_tree, RepairReport};

const TEI_NAMESPACE: &str = "http://www.tei-c.org/ns/1.0";

/// Extracted post and comments, ready for validation and serialization.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    tree: Tree,
    post: NodeId,
    comments: NodeId,
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Tree::new("doc");
        let root = tree.root();
        let post = tree.sub_element(root, "post");
        let comments = tree.sub_element(root, "comments");
        Self {
            tree,
            post,
            comments,
        }
    }

    /// Build a document from the result trees of body and comment extraction.
    ///
    /// The children of each tree's root are copied into the matching section.
    #[must_use]
    pub fn from_parts(body: &Tree, comments: &Tree) -> Self {
        let mut doc = Self::new();
        for child in body.children(body.root()) {
            let copy = doc.tree.import(body, child);
            doc.tree.append(doc.post, copy);
        }
        for child in comments.children(comments.root()) {
            let copy = doc.tree.import(comments, child);
            doc.tree.append(doc.comments, copy);
        }
        doc
    }

    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[must_use]
    pub fn post(&self) -> NodeId {
        self.post
    }

    #[must_use]
    pub fn comments(&self) -> NodeId {
        self.comments
    }

    /// Run structural repair over both sections.
    pub fn validate(&mut self) -> Result<RepairReport> {
        let post = validate_tree(&mut self.tree, self.post)?;
        let comments = validate_tree(&mut self.tree, self.comments)?;
        Ok(RepairReport {
            folded_elements: post.folded_elements + comments.folded_elements,
            stripped_attributes: post.stripped_attributes + comments.stripped_attributes,
        })
    }

    /// Whitespace-normalized text of the post section.
    #[must_use]
    pub fn post_text(&self) -> String {
        trim(&self.tree.iter_text(self.post, " "))
    }

    /// Whitespace-normalized text of the comments section.
    #[must_use]
    pub fn comments_text(&self) -> String {
        trim(&self.tree.iter_text(self.comments, " "))
    }

    /// Structured XML.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rs_textract::etree::Tree;
    /// use rs_textract::output::OutputDocument;
    ///
    /// let mut body = Tree::new("body");
    /// let p = body.sub_element(body.root(), "p");
    /// body.set_text(p, Some("Fish & chips".into()));
    /// let doc = OutputDocument::from_parts(&body, &Tree::new("body"));
    /// assert_eq!(doc.to_xml(), "<doc><post><p>Fish &amp; chips</p></post><comments/></doc>");
    /// ```
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        write_xml(&self.tree, self.tree.root(), &mut out);
        out
    }

    /// TEI XML.
    #[must_use]
    pub fn to_tei(&self) -> String {
        let mut out = String::new();
        out.push_str("<TEI xmlns=\"");
        out.push_str(TEI_NAMESPACE);
        out.push_str("\"><text><group>");
        for (section, kind, rendition) in [
            (self.post, "entry", "#pst"),
            (self.comments, "comments", "#cmt"),
        ] {
            if !self.tree.has_children(section) && section == self.comments {
                continue;
            }
            out.push_str("<text type=\"");
            out.push_str(kind);
            out.push_str("\" rendition=\"");
            out.push_str(rendition);
            out.push_str("\"><body>");
            write_section_children(&self.tree, section, &mut out);
            out.push_str("</body></text>");
        }
        out.push_str("</group></text></TEI>");
        out
    }

    /// Flattened, sanitized text: the post, then the comments after a newline.
    #[must_use]
    pub fn to_txt(&self) -> String {
        let post = flatten(&self.tree, self.post);
        let comments = flatten(&self.tree, self.comments);
        if comments.is_empty() {
            post
        } else {
            format!("{post}\n{comments}")
        }
    }
}

fn write_xml(tree: &Tree, id: NodeId, out: &mut String) {
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
    if tree.text(id).is_none_or(str::is_empty) && !tree.has_children(id) {
        out.push_str("/>");
        return;
    }
    out.push('>');
    write_section_children(tree, id, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_section_children(tree: &Tree, id: NodeId, out: &mut String) {
    if let Some(text) = tree.text(id) {
        out.push_str(&escape_text(text));
    }
    for child in tree.children(id) {
        write_xml(tree, child, out);
        if let Some(tail) = tree.tail(child) {
            out.push_str(&escape_text(tail));
        }
    }
}

fn write_txt(tree: &Tree, id: NodeId, out: &mut String) {
    let newline = NEWLINE_TAGS.contains(&tree.tag(id));
    if newline {
        out.push('\n');
    }
    if let Some(text) = tree.text(id) {
        out.push_str(text);
    }
    for child in tree.children(id) {
        write_txt(tree, child, out);
        if let Some(tail) = tree.tail(child) {
            out.push_str(tail);
        }
    }
    if newline {
        out.push('\n');
    } else {
        out.push(' ');
    }
}

/// Flatten a section: block elements surrounded by newlines, inline elements
/// followed by a space, then sanitized.
fn flatten(tree: &Tree, section: NodeId) -> String {
    let mut out = String::new();
    for child in tree.children(section) {
        write_txt(tree, child, &mut out);
        if let Some(tail) = tree.tail(child) {
            out.push_str(tail);
        }
    }
    sanitize(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OutputDocument {
        let mut body = Tree::new("body");
        let root = body.root();
        let head = body.sub_element(root, "head");
        body.set_text(head, Some("Title".into()));
        let p = body.sub_element(root, "p");
        body.set_text(p, Some("First ".into()));
        let hi = body.sub_element(p, "hi");
        body.set_attr(hi, "rendition", "bold");
        body.set_text(hi, Some("bold".into()));
        body.set_tail(hi, Some(" words.".into()));
        let list = body.sub_element(root, "list");
        for text in ["one", "two"] {
            let item = body.sub_element(list, "item");
            body.set_text(item, Some(text.into()));
        }

        let mut comments = Tree::new("body");
        let c = comments.sub_element(comments.root(), "p");
        comments.set_text(c, Some("Nice <post>".into()));
        OutputDocument::from_parts(&body, &comments)
    }

    #[test]
    fn test_xml() {
        assert_eq!(
            sample().to_xml(),
            "<doc><post><head>Title</head><p>First <hi rendition=\"bold\">bold</hi> words.</p>\
             <list><item>one</item><item>two</item></list></post>\
             <comments><p>Nice &lt;post&gt;</p></comments></doc>"
        );
    }

    #[test]
    fn test_tei() {
        let tei = sample().to_tei();
        assert!(tei.starts_with("<TEI xmlns=\"http://www.tei-c.org/ns/1.0\"><text><group>"));
        assert!(tei.contains("<text type=\"entry\" rendition=\"#pst\"><body><head>Title</head>"));
        assert!(tei.contains("<text type=\"comments\" rendition=\"#cmt\"><body><p>Nice &lt;post&gt;</p></body></text>"));
        assert!(tei.ends_with("</group></text></TEI>"));
    }

    #[test]
    fn test_tei_without_comments() {
        let doc = OutputDocument::from_parts(&Tree::new("body"), &Tree::new("body"));
        assert!(!doc.to_tei().contains("type=\"comments\""));
    }

    #[test]
    fn test_txt() {
        assert_eq!(sample().to_txt(), "Title\nFirst bold words.\none\ntwo\nNice <post>");
    }

    #[test]
    fn test_txt_line_breaks() {
        let mut body = Tree::new("body");
        let p = body.sub_element(body.root(), "p");
        body.set_text(p, Some("line one".into()));
        let lb = body.sub_element(p, "lb");
        body.set_tail(lb, Some("line  two\t".into()));
        let doc = OutputDocument::from_parts(&body, &Tree::new("body"));
        assert_eq!(doc.to_txt(), "line one\nline two");
    }

    #[test]
    fn test_section_texts() {
        let doc = sample();
        assert_eq!(doc.post_text(), "Title First bold words. one two");
        assert_eq!(doc.comments_text(), "Nice <post>");
    }

    #[test]
    fn test_validate_covers_both_sections() {
        let mut body = Tree::new("body");
        let span = body.sub_element(body.root(), "span");
        body.set_text(span, Some("loose".into()));
        let mut comments = Tree::new("body");
        let p = comments.sub_element(comments.root(), "p");
        comments.set_attr(p, "class", "x");
        comments.set_text(p, Some("c".into()));
        let mut doc = OutputDocument::from_parts(&body, &comments);
        match doc.validate() {
            Ok(report) => {
                assert_eq!(report.folded_elements, 1);
                assert_eq!(report.stripped_attributes, 1);
            }
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
        assert_eq!(doc.post_text(), "loose");
        assert_eq!(doc.to_xml(), "<doc><post>loose</post><comments><p>c</p></comments></doc>");
    }
}
