//! Status and content classification.
//!
//! These predicates run on every response of a load test, so they are all
//! single-pass prefix/equality checks over the raw header bytes: no MIME
//! parsing, no allocation. Header values that are not visible ASCII are
//! treated as absent.

use http::header::CONTENT_TYPE;
use http::HeaderMap;

// Success set seen from the generator's side: 2xx, the WebDAV multi-status
// family, and 304 all mean "the request produced a usable result".
const OK_CODES: [u16; 11] = [200, 201, 202, 203, 204, 205, 206, 207, 208, 209, 304];

const REDIRECT_CODES: [u16; 5] = [301, 302, 303, 307, 308];

const PERMANENT_REDIRECT_CODES: [u16; 2] = [301, 308];

const APPLICATION_PREFIX: &str = "application/";
const TEXT_PREFIX: &str = "text/";

const TEXT_APPLICATION_SUBTYPES: [&str; 5] =
    ["javascript", "json", "x-www-form-urlencoded", "xhtml+xml", "xml"];

const TEXT_TEXT_SUBTYPES: [&str; 6] = ["css", "csv", "html", "javascript", "plain", "xml"];

/// First `Content-Type` value, if readable as ASCII.
pub(crate) fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

/// True for status codes the generator counts as a usable result.
pub fn is_ok(status: u16) -> bool {
    OK_CODES.binary_search(&status).is_ok()
}

pub fn is_redirect(status: u16) -> bool {
    REDIRECT_CODES.binary_search(&status).is_ok()
}

pub fn is_permanent_redirect(status: u16) -> bool {
    PERMANENT_REDIRECT_CODES.binary_search(&status).is_ok()
}

pub fn is_not_modified(status: u16) -> bool {
    status == 304
}

/// True when the response carries a stylesheet.
pub fn is_css(headers: &HeaderMap) -> bool {
    content_type(headers).map_or(false, |ct| ct.starts_with("text/css"))
}

/// True when the response carries an HTML or XHTML document.
pub fn is_html(headers: &HeaderMap) -> bool {
    content_type(headers)
        .map_or(false, |ct| ct.starts_with("text/html") || ct.starts_with("application/xhtml+xml"))
}

/// True when the response was produced for an XHR call.
pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == "XMLHttpRequest")
}

/// True when the body is text-like and worth running text post-processing
/// on. Only the prefix up to the matched subtype is inspected, so content
/// type parameters (`; charset=...`) never get in the way.
pub fn is_text(headers: &HeaderMap) -> bool {
    content_type(headers).map_or(false, |ct| {
        if let Some(subtype) = ct.strip_prefix(APPLICATION_PREFIX) {
            TEXT_APPLICATION_SUBTYPES.iter().any(|s| subtype.starts_with(s))
        } else if let Some(subtype) = ct.strip_prefix(TEXT_PREFIX) {
            TEXT_TEXT_SUBTYPES.iter().any(|s| subtype.starts_with(s))
        } else {
            false
        }
    })
}

/// Scheme-prefix fast path, not URL validation: callers have already
/// established the string is a URL, so `httpfoo://` passing is accepted.
pub fn is_absolute_http_url(url: &str) -> bool {
    url.starts_with("http")
}

/// Same fast path for WebSocket URLs (`ws://` and `wss://`).
pub fn is_absolute_ws_url(url: &str) -> bool {
    url.starts_with("ws")
}
