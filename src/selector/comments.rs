//! Comment Selectors
//!
//! Rules for locating the comment region and for pruning comment debris
//! (reply forms, headings, moderation notices) out of it.

use crate::selector::utils::{
    Attr,
    Pattern::{Contains, Equals, StartsWith, Tag},
};
use crate::selector::{Rule, Tags};

const COMMENT_CONTAINERS: Tags = Tags::OneOf(&["div", "list", "section"]);

/// Comment region rules in priority order.
pub static COMMENTS_RULES: &[Rule] = &[
    // Comment list containers
    Rule {
        tags: COMMENT_CONTAINERS,
        patterns: &[
            Contains(Attr::Id, "commentlist"),
            Contains(Attr::Class, "commentlist"),
            Contains(Attr::Class, "comment-page"),
            Contains(Attr::Id, "comment-list"),
            Contains(Attr::Class, "comments-list"),
            Contains(Attr::Class, "comments-content"),
            Contains(Attr::Class, "post-comments"),
        ],
    },
    // Comment sections
    Rule {
        tags: COMMENT_CONTAINERS,
        patterns: &[
            StartsWith(Attr::Id, "comments"),
            StartsWith(Attr::Class, "comments"),
            StartsWith(Attr::Class, "Comments"),
            StartsWith(Attr::Id, "comment-"),
            StartsWith(Attr::Class, "comment-"),
            Contains(Attr::Class, "article-comments"),
        ],
    },
    // Comment platform embeds
    Rule {
        tags: COMMENT_CONTAINERS,
        patterns: &[
            StartsWith(Attr::Id, "comol"),
            StartsWith(Attr::Id, "disqus_thread"),
            StartsWith(Attr::Id, "dsq-comments"),
        ],
    },
    // Loose comment markers
    Rule {
        tags: Tags::OneOf(&["div", "section"]),
        patterns: &[
            StartsWith(Attr::Id, "social"),
            Contains(Attr::Class, "comment"),
        ],
    },
];

/// Debris removed from the comment region before extraction.
pub static COMMENTS_DISCARD_RULES: &[Rule] = &[
    // Reply form
    Rule {
        tags: Tags::OneOf(&["div", "section"]),
        patterns: &[StartsWith(Attr::Id, "respond")],
    },
    // Quoted material inside comments
    Rule {
        tags: Tags::OneOf(&["cite", "quote"]),
        patterns: &[Tag("cite"), Tag("quote")],
    },
    // Titles, notices, sign-in prompts, hidden parts
    Rule {
        tags: Tags::Any,
        patterns: &[
            Equals(Attr::Class, "comments-title"),
            Contains(Attr::Class, "comments-title"),
            Contains(Attr::Class, "nocomments"),
            StartsWith(Attr::Id, "reply-"),
            StartsWith(Attr::Class, "reply-"),
            Contains(Attr::Class, "-reply-"),
            Contains(Attr::Class, "message"),
            Contains(Attr::Class, "signin"),
            Contains(Attr::Id, "akismet"),
            Contains(Attr::Class, "akismet"),
            Contains(Attr::Style, "display:none"),
        ],
    },
];
