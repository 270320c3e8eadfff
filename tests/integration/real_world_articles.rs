//! Real-world article layouts
//!
//! A blog post with a comment thread and a news article with teaser and
//! newsletter boxes.

use rs_textract::{ExtractionSource, Options, OutputFormat};

use super::{fixture, must_extract};

#[test]
fn test_blog_post_body() {
    let result = must_extract(&fixture("blog_post.html"), Options::default());
    let body = &result.body_text;

    assert_eq!(result.source, ExtractionSource::Selectors);
    for expected in [
        "We rented a narrowboat",
        "eleven locks",
        "Getting started",
        "Bring gloves for the lock gates",
        "Slow down, nobody is in a hurry on the canal.",
        "Next year we will book a full week.",
    ] {
        assert!(body.contains(expected), "missing {expected:?} in {body:?}");
    }
    for unwanted in [
        "Archive",
        "SIDEBAR_MARKER",
        "Share on Facebook",
        "Tags:",
        "ASIDE_MARKER",
        "FOOTER_MARKER",
        "dataLayer",
        "Lovely write-up",
        "Leave a Reply",
    ] {
        assert!(!body.contains(unwanted), "unexpected {unwanted:?} in {body:?}");
    }
}

#[test]
fn test_blog_post_comments() {
    let result = must_extract(&fixture("blog_post.html"), Options::default());
    let comments = &result.comments_text;

    assert!(comments.contains("Lovely write-up"));
    assert!(comments.contains("Which boatyard did you rent from?"));
    assert!(comments.contains("The tunnels are the best part"));
    assert!(!comments.contains("thoughts on this post"));
    assert!(!comments.contains("Leave a Reply"));
}

#[test]
fn test_blog_post_structured_output() {
    let result = must_extract(
        &fixture("blog_post.html"),
        Options {
            output_format: OutputFormat::Xml,
            ..Options::default()
        },
    );
    let xml = match result.serialize(OutputFormat::Xml) {
        Ok(xml) => xml,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert!(xml.starts_with("<doc><post>"));
    assert!(xml.contains(r#"<hi rendition="italic">eleven locks</hi>"#));
    assert!(xml.contains(r#"<hi rendition="bold">lock procedure</hi>"#));
    assert!(xml.contains("<head>Getting started</head>"));
    assert!(xml.contains("<list><item>Bring gloves for the lock gates</item><item>Moor before dusk</item></list>"));
    assert!(xml.contains("<quote><p>Slow down, nobody is in a hurry on the canal.</p></quote>"));
    assert!(xml.contains("<comments><list>"));
    assert!(!xml.contains("class="));
}

#[test]
fn test_blog_post_text_output() {
    let result = must_extract(&fixture("blog_post.html"), Options::default());
    let txt = result.document.to_txt();
    let lines: Vec<&str> = txt.lines().collect();

    assert!(lines.contains(&"Getting started"));
    assert!(lines.contains(&"Bring gloves for the lock gates"));
    assert!(lines.contains(&"Moor before dusk"));
    assert!(lines.iter().all(|line| !line.trim().is_empty()));
    assert!(lines.iter().all(|line| !line.contains("  ")));
    assert!(!txt.contains('<'));
}

#[test]
fn test_news_article_default() {
    let result = must_extract(&fixture("news_article.html"), Options::default());
    let body = &result.body_text;

    assert!(body.contains("Nach drei Jahren Bauzeit"));
    assert!(body.contains("Für Radfahrer"));
    assert!(body.contains("TEASER_MARKER"));
    assert!(!body.contains("Von unserer Redaktion"));
    assert!(!body.contains("Newsletter"));
    assert!(!body.contains("Cookies"));
    assert!(result.comments_text.is_empty());
}

#[test]
fn test_news_article_precision_drops_teaser() {
    let result = must_extract(
        &fixture("news_article.html"),
        Options {
            favor_precision: true,
            ..Options::default()
        },
    );
    assert!(result.body_text.contains("Nach drei Jahren Bauzeit"));
    assert!(!result.body_text.contains("TEASER_MARKER"));
}

#[test]
fn test_news_article_language() {
    let result = must_extract(
        &fixture("news_article.html"),
        Options {
            target_language: Some("de".to_string()),
            ..Options::default()
        },
    );
    assert_eq!(result.language.as_deref(), Some("de"));

    let rejected = super::extract_with(
        &fixture("news_article.html"),
        Options {
            target_language: Some("en".to_string()),
            ..Options::default()
        },
    );
    assert!(rejected.is_none());
}
