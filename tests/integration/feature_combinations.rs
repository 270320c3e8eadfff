//! Integration tests for feature combinations
//!
//! Tests that verify several options work correctly together.

use rs_textract::{Extractor, Options, OutputFormat};

use super::{fixture, must_extract};

fn process(options: Options) -> String {
    match Extractor::new(options).process_record(&fixture("blog_post.html"), Some("blog-1")) {
        Ok(Some(output)) => output,
        Ok(None) => panic!("expected output"),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn test_no_comments_keeps_them_out_of_body() {
    let result = must_extract(
        &fixture("blog_post.html"),
        Options {
            include_comments: false,
            ..Options::default()
        },
    );
    assert!(result.comments_text.is_empty());
    assert!(!result.body_text.contains("Lovely write-up"));
    assert!(result.body_text.contains("We rented a narrowboat"));
}

#[test]
fn test_fast_mode_with_xml() {
    let xml = process(Options {
        no_fallback: true,
        output_format: OutputFormat::Xml,
        ..Options::default()
    });
    assert!(xml.starts_with("<doc><post>"));
    assert!(xml.ends_with("</comments></doc>"));
}

#[test]
fn test_tei_with_comments() {
    let tei = process(Options {
        output_format: OutputFormat::XmlTei,
        ..Options::default()
    });
    assert!(tei.starts_with(r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">"#));
    assert!(tei.contains(r##"<text type="entry" rendition="#pst">"##));
    assert!(tei.contains(r##"<text type="comments" rendition="#cmt">"##));
}

#[test]
fn test_tei_without_comments() {
    let tei = process(Options {
        output_format: OutputFormat::XmlTei,
        include_comments: false,
        ..Options::default()
    });
    assert!(tei.contains(r#"<text type="entry""#));
    assert!(!tei.contains(r#"<text type="comments""#));
}

#[test]
fn test_json_with_record_id() {
    let json = process(Options {
        output_format: OutputFormat::Json,
        target_language: Some("en".to_string()),
        ..Options::default()
    });
    let value: serde_json::Value = match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert_eq!(value["source"], "blog-1");
    assert_eq!(value["language"], "en");
    assert_eq!(value["extraction"], "selectors");
    assert!(value["text"].as_str().is_some_and(|t| t.contains("narrowboat")));
    assert!(value["comments"].as_str().is_some_and(|t| t.contains("Lovely write-up")));
}

#[test]
fn test_precision_and_fast_together() {
    let result = must_extract(
        &fixture("news_article.html"),
        Options {
            favor_precision: true,
            no_fallback: true,
            ..Options::default()
        },
    );
    assert!(!result.body_text.contains("TEASER_MARKER"));
    assert!(!result.body_text.contains("Newsletter"));
}

#[test]
fn test_options_from_config_file_shape() {
    let options = match Options::from_json(
        r#"{"include_comments": false, "output_format": "json", "fallback_ratio": 3.0}"#,
    ) {
        Ok(options) => options,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    let json = process(options);
    assert!(json.contains(r#""comments":"""#));
}
