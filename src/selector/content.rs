//! Body region rules
//!
//! Tried in order; the first rule with a match supplies the candidate region.

use crate::selector::utils::{
    Attr,
    Pattern::{Contains, ContainsFolded, Equals, StartsWith, Tag},
};
use crate::selector::{Rule, Tags};

const BLOCK_REGIONS: Tags = Tags::OneOf(&["article", "div", "main", "section"]);

/// Body region rules in priority order.
pub static BODY_RULES: &[Rule] = &[
    // Explicit article-body markers
    Rule {
        tags: BLOCK_REGIONS,
        patterns: &[
            Equals(Attr::Class, "post"),
            Equals(Attr::Class, "entry"),
            Contains(Attr::Class, "post-text"),
            Contains(Attr::Class, "post_text"),
            Contains(Attr::Class, "post-body"),
            Contains(Attr::Class, "post-entry"),
            Contains(Attr::Class, "postentry"),
            Contains(Attr::Class, "post-content"),
            Contains(Attr::Class, "post_content"),
            Contains(Attr::Class, "postcontent"),
            Contains(Attr::Class, "postContent"),
            Contains(Attr::Class, "article-text"),
            Contains(Attr::Class, "articletext"),
            Contains(Attr::Class, "articleText"),
            Contains(Attr::Id, "entry-content"),
            Contains(Attr::Class, "entry-content"),
            Contains(Attr::Id, "article-content"),
            Contains(Attr::Class, "article-content"),
            Contains(Attr::Id, "article__content"),
            Contains(Attr::Class, "article__content"),
            Contains(Attr::Id, "article-body"),
            Contains(Attr::Class, "article-body"),
            Contains(Attr::Id, "article__body"),
            Contains(Attr::Class, "article__body"),
            Equals(Attr::ItemProp, "articleBody"),
            ContainsFolded(Attr::Id, "articlebody"),
            ContainsFolded(Attr::Class, "articlebody"),
            Equals(Attr::Id, "articleContent"),
            Contains(Attr::Class, "ArticleContent"),
            Contains(Attr::Class, "page-content"),
            Contains(Attr::Class, "text-content"),
            Contains(Attr::Id, "body-text"),
            Contains(Attr::Class, "body-text"),
            Contains(Attr::Class, "article__container"),
            Contains(Attr::Id, "art-content"),
            Contains(Attr::Class, "art-content"),
        ],
    },
    // First article element
    Rule {
        tags: Tags::OneOf(&["article"]),
        patterns: &[],
    },
    // Story and CMS theme containers
    Rule {
        tags: BLOCK_REGIONS,
        patterns: &[
            Contains(Attr::Class, "post-bodycopy"),
            Contains(Attr::Class, "storycontent"),
            Contains(Attr::Class, "story-content"),
            Equals(Attr::Class, "postarea"),
            Equals(Attr::Class, "art-postcontent"),
            Contains(Attr::Class, "theme-content"),
            Contains(Attr::Class, "blog-content"),
            Contains(Attr::Class, "section-content"),
            Contains(Attr::Class, "single-content"),
            Contains(Attr::Class, "single-post"),
            Contains(Attr::Class, "main-column"),
            Contains(Attr::Class, "wpb_text_column"),
            StartsWith(Attr::Id, "primary"),
            StartsWith(Attr::Class, "article "),
            Equals(Attr::Class, "text"),
            Equals(Attr::Id, "article"),
            Equals(Attr::Class, "cell"),
            Equals(Attr::Id, "story"),
            Equals(Attr::Class, "story"),
            Contains(Attr::Class, "story-body"),
            Contains(Attr::Class, "field-body"),
            ContainsFolded(Attr::Class, "fulltext"),
        ],
    },
    // Generic content containers
    Rule {
        tags: BLOCK_REGIONS,
        patterns: &[
            Contains(Attr::Id, "content-main"),
            Contains(Attr::Class, "content-main"),
            Contains(Attr::Class, "content_main"),
            Contains(Attr::Id, "content-body"),
            Contains(Attr::Class, "content-body"),
            Contains(Attr::Id, "contentBody"),
            Contains(Attr::Class, "content__body"),
            ContainsFolded(Attr::Id, "main-content"),
            ContainsFolded(Attr::Class, "main-content"),
            ContainsFolded(Attr::Class, "page-content"),
            Equals(Attr::Id, "content"),
            Equals(Attr::Class, "content"),
        ],
    },
    // Main landmarks
    Rule {
        tags: BLOCK_REGIONS,
        patterns: &[
            StartsWith(Attr::Class, "main"),
            StartsWith(Attr::Id, "main"),
            StartsWith(Attr::Role, "main"),
            Tag("main"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::selector::query;

    /// Index of the first body rule that finds something, and the match's id attribute.
    fn first_rule(html: &str) -> Option<(usize, Option<String>)> {
        let tree = dom::parse(html);
        BODY_RULES.iter().enumerate().find_map(|(index, rule)| {
            query(&tree, tree.root(), rule)
                .map(|id| (index, tree.attr(id, "id").map(str::to_string)))
        })
    }

    #[test]
    fn test_entry_content_matches_first_rule() {
        let found = first_rule(r#"<div class="entry-content" id="x"><p>text</p></div>"#);
        assert_eq!(found, Some((0, Some("x".to_string()))));
    }

    #[test]
    fn test_item_prop_article_body() {
        let found = first_rule(r#"<section itemprop="articleBody" id="s"></section>"#);
        assert_eq!(found, Some((0, Some("s".to_string()))));
    }

    #[test]
    fn test_article_tag_is_second_choice() {
        let found = first_rule(r#"<div class="main"></div><article id="a"></article>"#);
        assert_eq!(found, Some((1, Some("a".to_string()))));
    }

    #[test]
    fn test_fulltext_is_case_folded() {
        let found = first_rule(r#"<div class="FullText" id="f"></div>"#);
        assert_eq!(found, Some((2, Some("f".to_string()))));
    }

    #[test]
    fn test_content_id_rule() {
        let found = first_rule(r#"<div id="content"></div>"#);
        assert_eq!(found, Some((3, Some("content".to_string()))));
    }

    #[test]
    fn test_main_landmark_is_last_resort() {
        assert_eq!(first_rule(r#"<main id="m"></main>"#), Some((4, Some("m".to_string()))));
        assert_eq!(first_rule(r#"<div role="main" id="r"></div>"#), Some((4, Some("r".to_string()))));
    }

    #[test]
    fn test_span_never_selected() {
        assert_eq!(first_rule(r#"<span class="entry-content"></span>"#), None);
    }
}
