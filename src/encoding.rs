//! Character decoding of fetched pages.
//!
//! Response bodies arrive as bytes. The charset is taken from the response
//! `Content-Type` when it names one, then from the document's own
//! `<meta charset>` / `<meta http-equiv="Content-Type">` declaration, and
//! finally defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// `charset=` parameter, in a header value or a meta `content` attribute
#[allow(clippy::expect_used)]
static CHARSET_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s]+)"#).expect("valid regex")
});

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>]+)"#).expect("valid regex")
});

/// Declarations are only honored in the head of the document.
const SNIFF_LIMIT: usize = 1024;

/// Encoding named by the `charset` parameter of a `Content-Type` value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    CHARSET_PARAM_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Encoding declared inside the first bytes of the document.
///
/// Covers both `<meta charset>` and the `http-equiv` form, since the latter
/// also carries `charset=` inside its `content` attribute.
#[must_use]
pub fn sniff_meta_charset(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Pick the encoding for a body given the declared content type.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    content_type
        .and_then(charset_from_content_type)
        .or_else(|| sniff_meta_charset(html))
        .unwrap_or(UTF_8)
}

/// Decode an HTML body to UTF-8.
///
/// A byte-order mark overrides any declaration. Malformed sequences are
/// replaced with U+FFFD rather than failing.
#[must_use]
pub fn decode_html<'a>(html: &'a [u8], content_type: Option<&str>) -> Cow<'a, str> {
    let encoding = detect_encoding(html, content_type);
    let (decoded, _used, _had_errors) = encoding.decode(html);
    decoded
}
