//! Charset detection and body decoding.
//!
//! The charset is pulled straight out of the raw `Content-Type` value with
//! a permissive scan rather than a full MIME parse, with a fast path for
//! the overwhelmingly common `charset=UTF-8`. Unknown charset labels
//! resolve to nothing instead of failing.

use encoding_rs::{Encoding, UTF_8};
use http::HeaderMap;

use crate::classify::content_type;

const CHARSET_PREFIX: &str = "charset=";

/// Charset named by a raw `Content-Type` value, if any.
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let start = content_type.find(CHARSET_PREFIX)? + CHARSET_PREFIX.len();
    let rest = &content_type[start..];

    // Hot path: the 5 bytes right after "charset=" spell UTF-8
    if rest.len() >= 5 && rest.as_bytes()[..5].eq_ignore_ascii_case(b"UTF-8") {
        return Some(UTF_8);
    }

    let end = rest.find(';').unwrap_or(rest.len());
    let label = trim_quotes(rest[..end].trim());
    Encoding::for_label(label.as_bytes())
}

/// Decodes a response body using the charset advertised in `Content-Type`,
/// falling back to lossy UTF-8 when no (or no known) charset is declared.
pub fn decode_body(headers: &HeaderMap, body: &[u8]) -> String {
    match content_type(headers).and_then(charset_from_content_type) {
        Some(encoding) if encoding == UTF_8 => String::from_utf8_lossy(body).into_owned(),
        Some(encoding) => encoding.decode(body).0.into_owned(),
        None => String::from_utf8_lossy(body).into_owned(),
    }
}

// One leading and one trailing double quote, each optional
fn trim_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}
