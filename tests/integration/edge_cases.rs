//! Edge case integration tests
//!
//! Unusable input, malformed markup and boundary conditions.

use rs_textract::{Error, ExtractionSource, Extractor, Options};

use super::{extract_with, must_extract};

fn long_paragraph(topic: &str) -> String {
    format!(
        "The {topic} committee reviewed every proposal submitted this year and \
         published a summary of its findings together with the full list of votes."
    )
}

#[test]
fn test_empty_and_tiny_inputs_yield_nothing() {
    assert!(extract_with("", Options::default()).is_none());
    assert!(extract_with("<p>hi</p>", Options::default()).is_none());
    assert!(extract_with("   \n\t  ", Options::default()).is_none());
}

#[test]
fn test_oversized_input_yields_nothing() {
    let html = format!(
        "<html><body><div class=\"entry-content\"><p>{}</p><p>{}</p></div></body></html>",
        long_paragraph("transport"),
        long_paragraph("housing")
    );
    let options = Options {
        max_file_size: 64,
        ..Options::default()
    };
    assert!(extract_with(&html, options).is_none());
}

#[test]
fn test_head_only_document_yields_nothing() {
    let html = "<html><head><title>Only a title here</title></head></html>";
    assert!(extract_with(html, Options::default()).is_none());
}

#[test]
fn test_script_only_document_yields_nothing() {
    let html = "<html><body><script>var a = 'lots of code that is not prose at all';</script></body></html>";
    assert!(extract_with(html, Options::default()).is_none());
}

#[test]
fn test_punctuation_only_document_yields_nothing() {
    let line = "<p>.... ---- !!!! ???? ;;;; ,,,, :::: ____ ====</p>".repeat(20);
    let html = format!("<html><body><div class=\"entry-content\">{line}</div></body></html>");
    assert!(extract_with(&html, Options::default()).is_none());
}

#[test]
fn test_malformed_markup_is_recovered() {
    let html = format!(
        "<html><body><div class=\"entry-content\"><p>{}<p>{}</div><div><b>unclosed",
        long_paragraph("transport"),
        long_paragraph("housing")
    );
    let result = must_extract(&html, Options::default());
    assert!(result.body_text.contains("transport committee"));
    assert!(result.body_text.contains("housing committee"));
}

#[test]
fn test_undeclared_charset_falls_back() {
    let mut html = b"<html><body><div class=\"entry-content\"><p>".to_vec();
    html.extend_from_slice(long_paragraph("cafe").as_bytes());
    html.extend_from_slice(b" Caf\xE9 au lait.</p><p>");
    html.extend_from_slice(long_paragraph("harbour").as_bytes());
    html.extend_from_slice(b"</p></div></body></html>");

    match Extractor::default().extract_bytes(&html, None, None) {
        Ok(Some(result)) => assert!(result.body_text.contains("Café au lait.")),
        Ok(None) => panic!("expected output"),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn test_declared_charset_mismatch_is_fatal() {
    let mut html = b"<html><head><meta charset=\"utf-8\"></head><body><p>".to_vec();
    html.extend_from_slice(long_paragraph("transport").as_bytes());
    html.extend_from_slice(b" \xFF\xFE broken</p></body></html>");

    assert!(matches!(
        Extractor::default().extract_bytes(&html, None, None),
        Err(Error::Decode(_))
    ));
}

#[test]
fn test_content_hidden_in_form_is_recovered() {
    let words = "lorem ".repeat(50);
    let html = format!(
        "<html><head><title>Form page</title></head><body><form action=\"/send\"><p>{words}</p></form></body></html>"
    );
    let result = must_extract(&html, Options::default());
    assert_eq!(result.source, ExtractionSource::Recovery);
    assert_eq!(result.body_text, words.trim());
}

#[test]
fn test_page_without_region_uses_wild_paragraphs() {
    let html = format!(
        "<html><body><div class=\"wrapper\"><div class=\"inner\"><p>{}</p><p>{}</p></div></div></body></html>",
        long_paragraph("transport"),
        long_paragraph("housing")
    );
    let result = must_extract(
        &html,
        Options {
            no_fallback: true,
            ..Options::default()
        },
    );
    assert!(result.body_text.starts_with("The transport committee"));
    assert_eq!(result.source, ExtractionSource::Selectors);
}
