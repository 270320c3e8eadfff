//! Character encoding detection and decoding.
//!
//! Raw page bytes are decoded strictly: a charset that the page declares (byte
//! order mark, `<meta charset>`, `http-equiv` content type, or an HTTP header hint)
//! must decode the bytes without replacement characters, otherwise the document is
//! rejected with [`Error::Decode`]. Undeclared pages are tried as UTF-8 first and
//! fall back to windows-1252, which maps every byte.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::Regex;
use std::sync::LazyLock;

/// Number of leading bytes scanned for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;/]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Match the charset parameter of an HTTP `Content-Type` header value.
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Find the charset the markup declares in its first kilobyte, if any.
#[must_use]
pub fn declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    CONTENT_TYPE_CHARSET_RE
        .captures(&head)
        .or_else(|| CHARSET_META_RE.captures(&head))
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Resolve the charset named in an HTTP `Content-Type` header value.
#[must_use]
pub fn header_encoding(content_type: &str) -> Option<&'static Encoding> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Decode page bytes to a UTF-8 string.
///
/// # Examples
///
/// ```
/// use rs_textract::encoding::decode_html;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// let text = decode_html(html, None)?;
/// assert!(text.contains("Café"));
/// # Ok::<(), rs_textract::Error>(())
/// ```
pub fn decode_html(html: &[u8], header_hint: Option<&str>) -> Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(html) {
        return decode_strict(encoding, &html[bom_len..]);
    }

    let declared = header_hint
        .and_then(header_encoding)
        .or_else(|| declared_encoding(html));

    match declared {
        Some(encoding) => decode_strict(encoding, html),
        None => match UTF_8.decode_without_bom_handling_and_without_replacement(html) {
            Some(text) => Ok(text.into_owned()),
            None => decode_strict(WINDOWS_1252, html),
        },
    }
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Result<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
        .ok_or_else(|| {
            Error::Decode(format!(
                "input is not valid {} as declared",
                encoding.name()
            ))
        })
}
