//! jusText-style paragraph classifier.
//!
//! The document is cut into paragraphs at block-level tags (and at double line
//! breaks). Each paragraph is first classified on its own:
//!
//! - too many link characters, a copyright sign or a `select` ancestor: bad
//! - shorter than `length_low`: short (bad when it holds a link)
//! - stopword density at least `stopwords_high`: good when longer than
//!   `length_high`, near-good otherwise
//! - stopword density at least `stopwords_low`: near-good
//! - anything else: bad
//!
//! The classes are then revised from their neighbours: short headings close to
//! good content become near-good, short and near-good paragraphs take the class
//! of the content around them, and bad headings followed by good content are
//! restored.

use std::collections::HashSet;

use crate::dom;
use crate::error::{Error, Result};
use crate::etree::{NodeId, Tree};

use super::stoplists::{self, words};
use super::{BoilerplateClassifier, ClassifiedBlock};

/// Tags that open and close a paragraph.
const PARAGRAPH_TAGS: [&str; 47] = [
    "address", "article", "aside", "blockquote", "body", "caption", "center", "col", "colgroup",
    "dd", "details", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "html", "legend", "li", "main", "nav",
    "ol", "optgroup", "option", "p", "pre", "section", "summary", "table", "tbody", "td",
    "textarea", "tfoot", "th", "thead", "tr",
];

/// Tags whose content is never text.
const IGNORED_TAGS: [&str; 6] = ["head", "noscript", "script", "style", "svg", "template"];

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Good,
    NearGood,
    Short,
    Bad,
}

#[derive(Debug, Clone)]
struct Paragraph {
    dom_path: Vec<String>,
    text: String,
    chars_in_links: usize,
    heading: bool,
    cf_class: Class,
    class: Class,
}

impl Paragraph {
    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn link_density(&self) -> f64 {
        let len = self.len();
        if len == 0 {
            return 0.0;
        }
        self.chars_in_links as f64 / len as f64
    }

    fn stopword_density(&self, stoplist: &HashSet<&str>) -> f64 {
        let mut total = 0usize;
        let mut hits = 0usize;
        for word in words(&self.text) {
            total += 1;
            if stoplist.contains(word.as_str()) {
                hits += 1;
            }
        }
        if total == 0 {
            return 0.0;
        }
        hits as f64 / total as f64
    }
}

#[derive(Debug, Default)]
struct Builder {
    dom_path: Vec<String>,
    text: String,
    chars_in_links: usize,
}

/// Cuts a tree into paragraphs.
struct ParagraphMaker<'a> {
    tree: &'a Tree,
    path: Vec<String>,
    current: Builder,
    paragraphs: Vec<Paragraph>,
    in_link: usize,
    after_br: bool,
}

impl<'a> ParagraphMaker<'a> {
    fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            path: Vec::new(),
            current: Builder::default(),
            paragraphs: Vec::new(),
            in_link: 0,
            after_br: false,
        }
    }

    fn make(mut self) -> Vec<Paragraph> {
        self.walk(self.tree.root());
        self.start_new_paragraph();
        self.paragraphs
    }

    fn start_new_paragraph(&mut self) {
        let builder = std::mem::take(&mut self.current);
        let text = collapse(&builder.text);
        if !text.is_empty() {
            let heading = builder
                .dom_path
                .iter()
                .any(|tag| HEADING_TAGS.contains(&tag.as_str()));
            self.paragraphs.push(Paragraph {
                dom_path: builder.dom_path,
                text,
                chars_in_links: builder.chars_in_links,
                heading,
                cf_class: Class::Bad,
                class: Class::Bad,
            });
        }
        self.current.dom_path.clone_from(&self.path);
    }

    fn characters(&mut self, content: &str) {
        if content.trim().is_empty() {
            self.current.text.push(' ');
            return;
        }
        let text = collapse(content);
        if self.in_link > 0 {
            self.current.chars_in_links += text.chars().count();
        }
        if content.starts_with(char::is_whitespace) {
            self.current.text.push(' ');
        }
        self.current.text.push_str(&text);
        if content.ends_with(char::is_whitespace) {
            self.current.text.push(' ');
        }
        self.after_br = false;
    }

    fn walk(&mut self, id: NodeId) {
        let tree = self.tree;
        let tag = tree.tag(id);
        if IGNORED_TAGS.contains(&tag) {
            return;
        }

        self.path.push(tag.to_string());
        if tag == "br" {
            if self.after_br {
                self.start_new_paragraph();
            } else {
                self.current.text.push(' ');
            }
            self.after_br = true;
        } else {
            if PARAGRAPH_TAGS.contains(&tag) {
                self.start_new_paragraph();
            }
            self.after_br = false;
        }
        if tag == "a" {
            self.in_link += 1;
        }

        if let Some(text) = tree.text(id) {
            self.characters(text);
        }
        for child in tree.children(id) {
            self.walk(child);
            if let Some(tail) = tree.tail(child) {
                self.characters(tail);
            }
        }

        self.path.pop();
        if tag == "a" {
            self.in_link -= 1;
        }
        if PARAGRAPH_TAGS.contains(&tag) {
            self.start_new_paragraph();
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Paragraph classifier after jusText.
///
/// # Example
///
/// ```rust
/// use rs_textract::classifier::{BoilerplateClassifier, JusTextClassifier};
///
/// let html = "<body><div><a href='/'>Home</a> | <a href='/about'>About</a></div>\
///     <p>The committee said that it would publish the report on the state of the \
///     river next week, after the results of the water samples that were taken in \
///     the spring have been checked by an independent laboratory in the city.</p></body>";
/// let blocks = JusTextClassifier::default().classify(html, "en")?;
/// let content: Vec<_> = blocks.iter().filter(|b| !b.is_boilerplate).collect();
/// assert_eq!(content.len(), 1);
/// assert!(content[0].text.starts_with("The committee"));
/// # Ok::<(), rs_textract::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct JusTextClassifier {
    pub length_low: usize,
    pub length_high: usize,
    pub stopwords_low: f64,
    pub stopwords_high: f64,
    pub max_link_density: f64,
    pub max_heading_distance: usize,
}

impl Default for JusTextClassifier {
    fn default() -> Self {
        Self {
            length_low: 70,
            length_high: 200,
            stopwords_low: 0.30,
            stopwords_high: 0.32,
            max_link_density: 0.2,
            max_heading_distance: 200,
        }
    }
}

impl JusTextClassifier {
    fn classify_context_free(&self, paragraphs: &mut [Paragraph], stoplist: &HashSet<&str>) {
        for paragraph in paragraphs.iter_mut() {
            let length = paragraph.len();
            let class = if paragraph.link_density() > self.max_link_density
                || paragraph.text.contains('\u{a9}')
                || paragraph.text.contains("&copy")
                || paragraph.dom_path.iter().any(|tag| tag == "select")
            {
                Class::Bad
            } else if length < self.length_low {
                if paragraph.chars_in_links > 0 {
                    Class::Bad
                } else {
                    Class::Short
                }
            } else {
                let density = paragraph.stopword_density(stoplist);
                if density >= self.stopwords_high {
                    if length > self.length_high {
                        Class::Good
                    } else {
                        Class::NearGood
                    }
                } else if density >= self.stopwords_low {
                    Class::NearGood
                } else {
                    Class::Bad
                }
            };
            paragraph.cf_class = class;
            paragraph.class = class;
        }
    }

    /// Whether a good paragraph follows `index` within the heading distance.
    fn good_follows(&self, paragraphs: &[Paragraph], index: usize) -> bool {
        let mut distance = 0;
        for next in &paragraphs[index + 1..] {
            if distance > self.max_heading_distance {
                break;
            }
            if next.class == Class::Good {
                return true;
            }
            distance += next.len();
        }
        false
    }

    fn revise(&self, paragraphs: &mut [Paragraph]) {
        // Short headings close to good content.
        for index in 0..paragraphs.len() {
            if paragraphs[index].heading
                && paragraphs[index].class == Class::Short
                && self.good_follows(paragraphs, index)
            {
                paragraphs[index].class = Class::NearGood;
            }
        }

        // Short paragraphs take the class of their surroundings.
        let mut revised = Vec::new();
        for index in 0..paragraphs.len() {
            if paragraphs[index].class != Class::Short {
                continue;
            }
            let prev = neighbour(paragraphs, index, Direction::Prev, true);
            let next = neighbour(paragraphs, index, Direction::Next, true);
            let class = match (prev, next) {
                (Class::Good, Class::Good) => Class::Good,
                (Class::Bad, Class::Bad) => Class::Bad,
                _ => {
                    let near_prev = prev == Class::Bad
                        && neighbour(paragraphs, index, Direction::Prev, false) == Class::NearGood;
                    let near_next = next == Class::Bad
                        && neighbour(paragraphs, index, Direction::Next, false) == Class::NearGood;
                    if near_prev || near_next {
                        Class::Good
                    } else {
                        Class::Bad
                    }
                }
            };
            revised.push((index, class));
        }
        for (index, class) in revised {
            paragraphs[index].class = class;
        }

        // Near-good paragraphs.
        let mut revised = Vec::new();
        for index in 0..paragraphs.len() {
            if paragraphs[index].class != Class::NearGood {
                continue;
            }
            let prev = neighbour(paragraphs, index, Direction::Prev, true);
            let next = neighbour(paragraphs, index, Direction::Next, true);
            let class = if prev == Class::Bad && next == Class::Bad {
                Class::Bad
            } else {
                Class::Good
            };
            revised.push((index, class));
        }
        for (index, class) in revised {
            paragraphs[index].class = class;
        }

        // Bad headings followed by good content.
        for index in 0..paragraphs.len() {
            if paragraphs[index].heading
                && paragraphs[index].class == Class::Bad
                && paragraphs[index].cf_class != Class::Bad
                && self.good_follows(paragraphs, index)
            {
                paragraphs[index].class = Class::Good;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Prev,
    Next,
}

/// Class of the nearest good or bad paragraph (or near-good one, unless ignored)
/// in `direction`; the document edge counts as bad.
fn neighbour(
    paragraphs: &[Paragraph],
    index: usize,
    direction: Direction,
    ignore_neargood: bool,
) -> Class {
    let candidates: Box<dyn Iterator<Item = &Paragraph>> = match direction {
        Direction::Prev => Box::new(paragraphs[..index].iter().rev()),
        Direction::Next => Box::new(paragraphs[index + 1..].iter()),
    };
    for paragraph in candidates {
        match paragraph.class {
            Class::Good | Class::Bad => return paragraph.class,
            Class::NearGood if !ignore_neargood => return Class::NearGood,
            _ => {}
        }
    }
    Class::Bad
}

impl BoilerplateClassifier for JusTextClassifier {
    fn name(&self) -> &'static str {
        "justext"
    }

    fn classify(&self, html: &str, stoplist: &str) -> Result<Vec<ClassifiedBlock>> {
        if html.trim().is_empty() {
            return Err(Error::Classifier("empty document".to_string()));
        }
        let words = stoplists::stoplist(stoplist)
            .ok_or_else(|| Error::Classifier(format!("unknown stoplist: {stoplist}")))?;

        let tree = dom::parse(html);
        let mut paragraphs = ParagraphMaker::new(&tree).make();
        self.classify_context_free(&mut paragraphs, words);
        self.revise(&mut paragraphs);

        Ok(paragraphs
            .into_iter()
            .map(|p| ClassifiedBlock {
                text: p.text,
                is_boilerplate: p.class != Class::Good,
                is_heading: p.heading,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_EN: &str = "The council decided on Tuesday that the new bridge over the river \
        will be built in the spring, and that the old one will be closed for cars as soon as \
        the work has started, which should not take more than a few weeks.";

    fn paragraphs(html: &str) -> Vec<Paragraph> {
        let tree = dom::parse(html);
        ParagraphMaker::new(&tree).make()
    }

    fn classify(html: &str) -> Vec<ClassifiedBlock> {
        match JusTextClassifier::default().classify(html, "en") {
            Ok(blocks) => blocks,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_paragraphs_split_on_blocks_and_double_breaks() {
        let found = paragraphs("<body><p>one <b>two</b></p>three<br>four<br><br>five</body>");
        let texts: Vec<&str> = found.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["one two", "three four", "five"]);
    }

    #[test]
    fn test_link_characters_counted() {
        let found = paragraphs(r#"<body><p>see <a href="/x">this link</a></p></body>"#);
        assert_eq!(found[0].chars_in_links, 9);
        assert!(found[0].link_density() > 0.5);
    }

    #[test]
    fn test_headings_detected() {
        let found = paragraphs("<body><h2>Title <em>here</em></h2><p>text</p></body>");
        assert!(found[0].heading);
        assert!(!found[1].heading);
    }

    #[test]
    fn test_scripts_ignored() {
        let found = paragraphs("<body><script>var a = 1;</script><p>text</p></body>");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_long_prose_is_good_and_menus_bad() {
        let html = format!(
            r#"<body><ul><li><a href="/">Home</a></li><li><a href="/news">News</a></li></ul>
            <p>{LONG_EN}</p><p>© 2024 Example Media. All rights reserved by the owners of this site.</p></body>"#
        );
        let blocks = classify(&html);
        let good: Vec<&str> = blocks
            .iter()
            .filter(|b| !b.is_boilerplate)
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(good, vec![LONG_EN.split_whitespace().collect::<Vec<_>>().join(" ")]);
    }

    #[test]
    fn test_short_between_good_becomes_good() {
        let html = format!("<body><p>{LONG_EN}</p><p>Short line.</p><p>{LONG_EN}</p></body>");
        let blocks = classify(&html);
        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| !b.is_boilerplate));
    }

    #[test]
    fn test_short_heading_before_good_is_kept() {
        let html = format!("<body><h2>Bridge plans</h2><p>{LONG_EN}</p></body>");
        let blocks = classify(&html);
        assert!(blocks[0].is_heading);
        assert!(!blocks[0].is_boilerplate);
    }

    #[test]
    fn test_isolated_short_text_is_bad() {
        let blocks = classify("<body><p>Login</p><p>Register</p></body>");
        assert!(blocks.iter().all(|b| b.is_boilerplate));
    }

    #[test]
    fn test_errors() {
        let classifier = JusTextClassifier::default();
        assert!(matches!(classifier.classify("  ", "en"), Err(Error::Classifier(_))));
        assert!(matches!(classifier.classify("<p>x</p>", "xx"), Err(Error::Classifier(_))));
    }
}
