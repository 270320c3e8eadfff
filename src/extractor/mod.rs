//! Main content extraction module.
//!
//! # Module Structure
//!
//! - `tags`: output vocabulary, tag sets and rendition hints
//! - `state`: per-region walk state (processed nodes, potential tags)
//! - `handlers`: per-element handlers building accepted elements
//! - `pruning`: discard-rule pruning of a candidate region
//! - `pipeline`: body region selection and the region walk
//! - `comments`: comment region selection and detachment
//! - `fallback`: classifier adapter, arbitration and last-resort recovery
//!
//! # Usage
//!
//! ```rust
//! use rs_textract::extractor::handlers::Context;
//! use rs_textract::extractor::{extract_comments, extract_content};
//! use rs_textract::html_processing::convert_tags;
//! use rs_textract::{dom, DuplicateCache, Options};
//!
//! let mut tree = dom::parse(
//!     r#"<div class="entry-content"><p>Body text.</p></div>
//!        <ol class="commentlist"><li>First!</li></ol>"#,
//! );
//! let root = tree.root();
//! convert_tags(&mut tree, root);
//!
//! let cache = DuplicateCache::default();
//! let opts = Options::default();
//! let ctx = Context::new(&cache, &opts);
//! let (_, comments) = extract_comments(&mut tree, ctx);
//! let (_, body) = extract_content(&mut tree, ctx);
//! assert_eq!(comments, "First!");
//! assert_eq!(body, "Body text.");
//! ```

pub mod comments;
pub mod fallback;
pub mod handlers;
pub mod pipeline;
pub mod pruning;
pub mod state;
pub mod tags;

pub use comments::extract_comments;
pub use fallback::{arbitrate, compare_extraction, last_resort, Arbitration};
pub use pipeline::extract_content;
pub use state::ExtractionState;
