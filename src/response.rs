//! Buffered HTTP response model.
//!
//! This struct represents a **fully buffered** HTTP response as handed to
//! the response-processing pipeline: the final URL (after redirects, if the
//! client follows them), status code + reason, response headers, and the
//! raw body bytes.
//!
//! ## Notes
//! - The body is stored as raw `Vec<u8>`; [`Response::body_text`] decodes
//!   it using the charset advertised in `Content-Type`.
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names and keeps repeated headers (`Set-Cookie`) in order.
//! - `status_text` is typically the status code's canonical reason phrase
//!   and may be `"Unknown"` for non-standard codes.

use cookie::Cookie;
use http::HeaderMap;
use url::Url;

use crate::clock::Clock;
use crate::{cache, charset, classify, cookies};

/// One received HTTP response.
///
/// All fields reflect the response as received; the methods below are thin
/// forwards to the classification, freshness and extraction functions, so
/// pipeline code can work from the one value it holds.
#[derive(Debug)]
pub struct Response {
    /// Final URL of the response (after redirects, if any).
    pub url: Url,

    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,

    /// Human-readable reason phrase (e.g., `"OK"`, `"Not Found"`).
    pub status_text: String,

    /// Response headers as a case-insensitive map.
    pub headers: HeaderMap,

    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        classify::is_ok(self.status)
    }

    pub fn is_redirect(&self) -> bool {
        classify::is_redirect(self.status)
    }

    pub fn is_permanent_redirect(&self) -> bool {
        classify::is_permanent_redirect(self.status)
    }

    pub fn is_not_modified(&self) -> bool {
        classify::is_not_modified(self.status)
    }

    pub fn is_css(&self) -> bool {
        classify::is_css(&self.headers)
    }

    pub fn is_html(&self) -> bool {
        classify::is_html(&self.headers)
    }

    pub fn is_ajax(&self) -> bool {
        classify::is_ajax(&self.headers)
    }

    pub fn is_text(&self) -> bool {
        classify::is_text(&self.headers)
    }

    /// Absolute expiration timestamp in epoch milliseconds, or `None` when
    /// this response must not be cached.
    pub fn expires(&self, clock: &dyn Clock) -> Option<i64> {
        cache::response_expires(&self.headers, clock)
    }

    /// All decodable `Set-Cookie` entries, in receipt order.
    pub fn cookies(&self) -> Vec<Cookie<'static>> {
        cookies::response_cookies(&self.headers)
    }

    /// Body decoded with the charset advertised in `Content-Type`, lossy
    /// UTF-8 otherwise.
    pub fn body_text(&self) -> String {
        charset::decode_body(&self.headers, &self.body)
    }
}
