//! Tag constants and catalogs.
//!
//! Source-vocabulary lists drive cleaning and normalization; output-vocabulary
//! sets drive extraction, validation and text flattening. Lists are arrays for
//! iteration, sets are `HashSet`s for O(1) lookup.

use std::collections::HashSet;
use std::sync::LazyLock;

// === Cleaning ===

/// Elements removed together with their subtree (the tail is kept).
pub static TAGS_TO_KILL: [&str; 29] = [
    "aside", "audio", "button", "canvas", "embed", "figure", "footer", "form", "frame",
    "frameset", "head", "iframe", "img", "input", "label", "link", "map", "math", "nav",
    "noscript", "object", "picture", "script", "select", "style", "svg", "textarea", "time",
    "video",
];

/// Elements unwrapped during cleaning: the tag goes, its content stays.
pub static TAGS_TO_STRIP: [&str; 15] = [
    "a", "abbr", "acronym", "address", "big", "blink", "cite", "font", "ins", "marquee", "meta",
    "small", "sub", "sup", "wbr",
];

/// Elements deleted when they have neither children nor text.
pub static EMPTY_TAGS_TO_REMOVE: [&str; 3] = ["div", "p", "section"];

/// `TAGS_TO_KILL` as a `HashSet`
pub static TAGS_TO_KILL_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TAGS_TO_KILL.into_iter().collect());

/// `TAGS_TO_STRIP` as a `HashSet`
pub static TAGS_TO_STRIP_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TAGS_TO_STRIP.into_iter().collect());

// === Normalization ===

/// Heading tags mapped to `head`.
pub static HEAD_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Line break tags mapped to `lb`.
pub static LB_TAGS: [&str; 2] = ["br", "hr"];

/// List containers mapped to `list`.
pub static LIST_TAGS: [&str; 3] = ["ul", "ol", "dl"];

/// List entries mapped to `item`.
pub static ITEM_TAGS: [&str; 2] = ["li", "dt"];

/// Quotation tags mapped to `quote`.
pub static QUOTE_TAGS: [&str; 2] = ["blockquote", "q"];

/// Strikethrough tags mapped to `del`.
pub static DEL_TAGS: [&str; 3] = ["del", "s", "strike"];

/// Inline containers whose text is merged into the surrounding flow.
pub static MERGE_TAGS: [&str; 2] = ["span", "dd"];

/// Visual renditions carried by `hi` and `del`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendition {
    Italic,
    Bold,
    Underline,
    Mono,
    Overstrike,
}

impl Rendition {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Italic => "italic",
            Self::Bold => "bold",
            Self::Underline => "underline",
            Self::Mono => "mono",
            Self::Overstrike => "overstrike",
        }
    }

    /// Rendition of an emphasis source tag mapped to `hi`.
    #[must_use]
    pub fn for_emphasis(tag: &str) -> Option<Self> {
        match tag {
            "em" | "i" => Some(Self::Italic),
            "b" | "strong" => Some(Self::Bold),
            "u" => Some(Self::Underline),
            "pre" | "tt" | "kbd" | "samp" => Some(Self::Mono),
            _ => None,
        }
    }
}

// === Extraction ===

/// Tags the region walk considers by default.
pub static TAG_CATALOG: [&str; 8] = ["code", "del", "head", "item", "lb", "list", "p", "quote"];

/// Tags that may appear as inline children of an extracted block.
pub static INLINE_TAGS: [&str; 4] = ["code", "del", "hi", "lb"];

/// `INLINE_TAGS` as a `HashSet`
pub static INLINE_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INLINE_TAGS.into_iter().collect());

/// Source containers that behave like blocks inside a region.
pub static BLOCK_TAGS: [&str; 15] = [
    "article", "center", "div", "head", "header", "item", "list", "main", "p", "quote",
    "section", "table", "tbody", "td", "tr",
];

/// `BLOCK_TAGS` as a `HashSet`
pub static BLOCK_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BLOCK_TAGS.into_iter().collect());

// === Output ===

/// Closed output vocabulary.
pub static OUTPUT_TAGS: [&str; 9] = [
    "code", "del", "head", "hi", "item", "lb", "list", "p", "quote",
];

/// `OUTPUT_TAGS` as a `HashSet`
pub static OUTPUT_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| OUTPUT_TAGS.into_iter().collect());

/// Attributes allowed on output elements.
pub static OUTPUT_ATTRIBUTES: [&str; 1] = ["rendition"];

/// Tags surrounded by newlines in flattened text.
pub static NEWLINE_TAGS: [&str; 6] = ["code", "head", "item", "lb", "p", "quote"];

/// Comment texts that are account widgets rather than comments.
pub static COMMENTS_BLACKLIST: [&str; 2] = ["( Abmelden / Ändern )", "( Log Out / Change )"];
