//! Overall Discard Patterns
//!
//! Boilerplate removed from the body region before extraction: navigation,
//! footers, related-content widgets, sharing, cookie and newsletter boxes,
//! bylines, paywall overlays, comment debris and hidden parts.

use crate::selector::utils::{
    Attr,
    Pattern::{Contains, ContainsFolded, Equals, Present, StartsWith},
};
use crate::selector::{Rule, Tags};

/// Block containers the chrome rules apply to (after tag normalization).
pub(crate) const CHROME_CONTAINERS: Tags =
    Tags::OneOf(&["div", "item", "list", "p", "section", "span"]);

/// Overall discard rules, applied in order.
pub static OVERALL_DISCARD_RULES: &[Rule] = &[
    // Page chrome
    Rule {
        tags: CHROME_CONTAINERS,
        patterns: &[
            ContainsFolded(Attr::Id, "footer"),
            ContainsFolded(Attr::Class, "footer"),
            Contains(Attr::Id, "related"),
            ContainsFolded(Attr::Class, "related"),
            Contains(Attr::Id, "viral"),
            Contains(Attr::Class, "viral"),
            StartsWith(Attr::Id, "shar"),
            StartsWith(Attr::Class, "shar"),
            Contains(Attr::Class, "share-"),
            ContainsFolded(Attr::Id, "share"),
            Contains(Attr::Id, "social"),
            Contains(Attr::Class, "social"),
            Contains(Attr::Class, "sociable"),
            Contains(Attr::Id, "syndication"),
            Contains(Attr::Class, "syndication"),
            StartsWith(Attr::Id, "jp-"),
            StartsWith(Attr::Id, "dpsp-content"),
            Contains(Attr::Class, "embedded"),
            Contains(Attr::Class, "embed"),
            Contains(Attr::Id, "newsletter"),
            Contains(Attr::Class, "newsletter"),
            Contains(Attr::Class, "subnav"),
            Contains(Attr::Id, "cookie"),
            Contains(Attr::Class, "cookie"),
            Contains(Attr::Id, "tags"),
            Contains(Attr::Class, "tags"),
            Contains(Attr::Id, "sidebar"),
            Contains(Attr::Class, "sidebar"),
            Contains(Attr::Id, "banner"),
            Contains(Attr::Class, "banner"),
            Contains(Attr::Class, "meta"),
            Contains(Attr::Id, "menu"),
            Contains(Attr::Class, "menu"),
            ContainsFolded(Attr::Id, "nav"),
            ContainsFolded(Attr::Role, "nav"),
            StartsWith(Attr::Class, "nav"),
            ContainsFolded(Attr::Class, "navigation"),
            Contains(Attr::Class, "navbar"),
            Contains(Attr::Class, "navbox"),
            StartsWith(Attr::Class, "post-nav"),
            Contains(Attr::Id, "breadcrumb"),
            Contains(Attr::Class, "breadcrumb"),
            Contains(Attr::Id, "bread-crumb"),
            Contains(Attr::Class, "bread-crumb"),
            Contains(Attr::Id, "author"),
            Contains(Attr::Class, "author"),
            Contains(Attr::Id, "button"),
            Contains(Attr::Class, "button"),
            ContainsFolded(Attr::Class, "byline"),
            Contains(Attr::Class, "rating"),
            StartsWith(Attr::Class, "widget"),
            Contains(Attr::Class, "attachment"),
            Contains(Attr::Class, "timestamp"),
            Contains(Attr::Class, "user-info"),
            Contains(Attr::Class, "user-profile"),
            Contains(Attr::Class, "-ad-"),
            Contains(Attr::Class, "-icon"),
            Contains(Attr::Class, "article-infos"),
            ContainsFolded(Attr::Class, "infoline"),
            Contains(Attr::DataComponent, "MostPopularStories"),
            Contains(Attr::Class, "options"),
            Contains(Attr::Class, "consent"),
            Contains(Attr::Class, "modal-content"),
            Contains(Attr::Class, "paid-content"),
            Contains(Attr::Class, "paidcontent"),
            Contains(Attr::Id, "premium-"),
            Contains(Attr::Id, "paywall"),
            Contains(Attr::Class, "obfuscated"),
            Contains(Attr::Class, "blurred"),
            Contains(Attr::Class, " ad "),
            Contains(Attr::Class, "next-post"),
            Contains(Attr::Class, "message-container"),
            Contains(Attr::Id, "message_container"),
            Present(Attr::DataLpReplacementContent),
        ],
    },
    // Comment debris and hidden parts
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
            Contains(Attr::Id, "akismet"),
            Contains(Attr::Class, "akismet"),
            StartsWith(Attr::Class, "hide-"),
            Contains(Attr::Class, "hide-print"),
            Contains(Attr::Id, "hidden"),
            Contains(Attr::Style, "hidden"),
            Contains(Attr::Hidden, "hidden"),
            Contains(Attr::Class, "noprint"),
            Contains(Attr::Style, "display:none"),
            Contains(Attr::Class, " hidden"),
            Equals(Attr::AriaHidden, "true"),
            Contains(Attr::Class, "notloaded"),
        ],
    },
];
