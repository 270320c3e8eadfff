//! Precision discard rules
//!
//! Extra pruning applied to the body region when `favor_precision` is set:
//! teasers, page headers, bottom bars and link collections.

use crate::selector::discard::CHROME_CONTAINERS;
use crate::selector::utils::{
    Attr,
    Pattern::{Contains, ContainsFolded},
};
use crate::selector::{Rule, Tags};

/// Teaser boxes.
pub static TEASER_DISCARD_RULES: &[Rule] = &[Rule {
    tags: CHROME_CONTAINERS,
    patterns: &[
        ContainsFolded(Attr::Id, "teaser"),
        ContainsFolded(Attr::Class, "teaser"),
    ],
}];

/// Headers, bottom bars and link lists.
pub static PRECISION_DISCARD_RULES: &[Rule] = &[
    Rule {
        tags: Tags::OneOf(&["header"]),
        patterns: &[],
    },
    Rule {
        tags: CHROME_CONTAINERS,
        patterns: &[
            Contains(Attr::Id, "bottom"),
            Contains(Attr::Class, "bottom"),
            Contains(Attr::Id, "link"),
            Contains(Attr::Class, "link"),
            Contains(Attr::Style, "border"),
        ],
    },
];
