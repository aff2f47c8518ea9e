//! Set-Cookie extraction.
//!
//! Servers routinely send cookies that bend the grammar; the `cookie`
//! crate's lenient parser takes care of most of that, and whatever still
//! fails to decode is dropped without a trace rather than failing the
//! response.

use cookie::Cookie;
use http::header::SET_COOKIE;
use http::HeaderMap;

/// All decodable `Set-Cookie` entries, in receipt order.
pub fn response_cookies(headers: &HeaderMap) -> Vec<Cookie<'static>> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| Cookie::parse(raw.to_owned()).ok())
        .collect()
}
