//! Response freshness resolution.
//!
//! Computes the absolute timestamp until which a response may be reused,
//! from `Pragma`, `Cache-Control` and `Expires`. This is freshness
//! *computation* only; storing and evicting entries is the caller's
//! business.
//!
//! Precedence:
//! 1. `Pragma: no-cache` forbids caching outright.
//! 2. A present `Cache-Control` header is authoritative: `no-cache`,
//!    `no-store` and `max-age=0` forbid caching, a non-negative `max-age`
//!    grants `now + max-age` seconds. `Expires` is never consulted when
//!    `Cache-Control` is present, even without a `max-age` directive.
//! 3. Otherwise a well-formed, still-future `Expires` date grants until
//!    that date.
//!
//! Every malformed or absent input maps to "not cacheable". Servers in the
//! wild send all kinds of broken cache headers; failing a response over one
//! would be disproportionate, so nothing in here can error.

use http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use http::HeaderMap;
use std::time::UNIX_EPOCH;

use crate::clock::Clock;

const NO_CACHE: &str = "no-cache";
const NO_STORE: &str = "no-store";
const MAX_AGE_PREFIX: &str = "max-age=";
const MAX_AGE_ZERO: &str = "max-age=0";

/// Absolute expiration timestamp in epoch milliseconds, or `None` when the
/// response must not be cached.
pub fn response_expires(headers: &HeaderMap, clock: &dyn Clock) -> Option<i64> {
    if pragma_no_cache(headers) {
        return None;
    }
    match header_value(headers, CACHE_CONTROL) {
        Some(cache_control) => max_age_expires(cache_control, clock),
        None => expires_header(headers, clock),
    }
}

fn header_value(headers: &HeaderMap, name: http::header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn pragma_no_cache(headers: &HeaderMap) -> bool {
    header_value(headers, PRAGMA).map_or(false, |v| v.contains(NO_CACHE))
}

fn max_age_expires(cache_control: &str, clock: &dyn Clock) -> Option<i64> {
    if cache_control.contains(NO_CACHE)
        || cache_control.contains(NO_STORE)
        || cache_control.contains(MAX_AGE_ZERO)
    {
        return None;
    }
    match extract_max_age(cache_control) {
        Some(secs) if secs >= 0 => secs
            .checked_mul(1000)
            .and_then(|millis| clock.now_millis().checked_add(millis))
            .filter(|&expires| expires >= 0),
        // Negative max-age is expired on arrival; no max-age at all means a
        // bare Cache-Control header, which grants nothing either.
        _ => None,
    }
}

/// Value of the `max-age` directive: `Some(-1)` for any negative value,
/// `Some(n)` for a digit run, `None` when the directive is absent or the
/// character after `=` is neither `-` nor a digit. A digit run that does
/// not fit an i64 counts as unparsable.
fn extract_max_age(cache_control: &str) -> Option<i64> {
    let start = cache_control.find(MAX_AGE_PREFIX)? + MAX_AGE_PREFIX.len();
    let rest = &cache_control[start..];
    match rest.bytes().next() {
        Some(b'-') => Some(-1),
        Some(b) if b.is_ascii_digit() => {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            rest[..end].parse::<i64>().ok()
        }
        _ => None,
    }
}

fn expires_header(headers: &HeaderMap, clock: &dyn Clock) -> Option<i64> {
    let raw = header_value(headers, EXPIRES)?;
    let date = trim_quotes(raw.trim());
    let parsed = httpdate::parse_http_date(date).ok()?;
    let millis = parsed.duration_since(UNIX_EPOCH).ok()?.as_millis() as i64;
    if millis > clock.now_millis() {
        Some(millis)
    } else {
        None
    }
}

// One leading and one trailing double quote, each optional
fn trim_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use http::header::HeaderName;
    use std::time::Duration;

    const NOW: i64 = 1_000_000;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                value.parse().unwrap(),
            );
        }
        map
    }

    fn expires_at(pairs: &[(&str, &str)]) -> Option<i64> {
        response_expires(&headers(pairs), &FixedClock(NOW))
    }

    fn http_date(epoch_millis: i64) -> String {
        httpdate::fmt_http_date(UNIX_EPOCH + Duration::from_millis(epoch_millis as u64))
    }

    #[test]
    fn no_cache_headers_at_all_means_not_cacheable() {
        assert_eq!(expires_at(&[]), None);
    }

    #[test]
    fn pragma_no_cache_short_circuits_everything() {
        assert_eq!(
            expires_at(&[
                ("pragma", "no-cache"),
                ("cache-control", "max-age=60"),
                ("expires", &http_date(NOW + 10_000)),
            ]),
            None
        );
    }

    #[test]
    fn pragma_without_no_cache_is_ignored() {
        assert_eq!(
            expires_at(&[("pragma", "public"), ("cache-control", "max-age=60")]),
            Some(NOW + 60_000)
        );
    }

    #[test]
    fn max_age_grants_relative_expiration() {
        assert_eq!(
            expires_at(&[("cache-control", "max-age=60")]),
            Some(1_060_000)
        );
    }

    #[test]
    fn cache_control_forbidding_directives() {
        assert_eq!(expires_at(&[("cache-control", "no-cache")]), None);
        assert_eq!(expires_at(&[("cache-control", "no-store")]), None);
        assert_eq!(expires_at(&[("cache-control", "max-age=0")]), None);
        assert_eq!(
            expires_at(&[("cache-control", "private, no-store, max-age=60")]),
            None
        );
    }

    #[test]
    fn negative_max_age_is_not_cacheable() {
        assert_eq!(expires_at(&[("cache-control", "max-age=-1")]), None);
        assert_eq!(expires_at(&[("cache-control", "max-age=-3600")]), None);
    }

    #[test]
    fn max_age_with_leading_zero_trips_the_zero_check() {
        // "max-age=05" contains the substring "max-age=0"
        assert_eq!(expires_at(&[("cache-control", "max-age=05")]), None);
    }

    #[test]
    fn max_age_digit_run_stops_at_first_non_digit() {
        assert_eq!(
            expires_at(&[("cache-control", "max-age=60, must-revalidate")]),
            Some(NOW + 60_000)
        );
        assert_eq!(
            expires_at(&[("cache-control", "max-age=60x")]),
            Some(NOW + 60_000)
        );
    }

    #[test]
    fn malformed_max_age_is_not_cacheable() {
        assert_eq!(expires_at(&[("cache-control", "max-age=abc")]), None);
        assert_eq!(expires_at(&[("cache-control", "max-age=")]), None);
        assert_eq!(expires_at(&[("cache-control", "public")]), None);
    }

    #[test]
    fn overflowing_max_age_is_not_cacheable() {
        // i64::MAX seconds: the *1000 overflows
        assert_eq!(
            expires_at(&[("cache-control", "max-age=9223372036854775807")]),
            None
        );
        // digit run too long for i64 at all
        assert_eq!(
            expires_at(&[("cache-control", "max-age=99999999999999999999999")]),
            None
        );
    }

    #[test]
    fn addition_overflow_is_not_cacheable() {
        let almost_max = FixedClock(i64::MAX - 500);
        assert_eq!(
            response_expires(&headers(&[("cache-control", "max-age=1")]), &almost_max),
            None
        );
    }

    #[test]
    fn present_cache_control_without_max_age_ignores_expires() {
        // Cache-Control presence is authoritative: no fallback to Expires
        assert_eq!(
            expires_at(&[
                ("cache-control", "public"),
                ("expires", &http_date(NOW + 10_000)),
            ]),
            None
        );
    }

    #[test]
    fn future_expires_is_honored_without_cache_control() {
        let future = NOW + 10_000;
        assert_eq!(expires_at(&[("expires", &http_date(future))]), Some(future));
    }

    #[test]
    fn past_expires_is_not_cacheable() {
        assert_eq!(expires_at(&[("expires", &http_date(NOW - 10_000))]), None);
    }

    #[test]
    fn expires_equal_to_now_is_not_cacheable() {
        assert_eq!(expires_at(&[("expires", &http_date(NOW))]), None);
    }

    #[test]
    fn known_http_date_round_trip() {
        // Wed, 21 Oct 2015 07:28:00 GMT
        let ts = 1_445_412_480_000;
        let resolved = response_expires(
            &headers(&[("expires", "Wed, 21 Oct 2015 07:28:00 GMT")]),
            &FixedClock(ts - 5_000),
        );
        assert_eq!(resolved, Some(ts));
    }

    #[test]
    fn quoted_and_padded_expires_is_accepted() {
        let future = NOW + 10_000;
        let quoted = format!("\"{}\"", http_date(future));
        assert_eq!(expires_at(&[("expires", &quoted)]), Some(future));

        let padded = format!("  {}  ", http_date(future));
        assert_eq!(expires_at(&[("expires", &padded)]), Some(future));
    }

    #[test]
    fn unparsable_expires_is_not_cacheable() {
        assert_eq!(expires_at(&[("expires", "0")]), None);
        assert_eq!(expires_at(&[("expires", "next tuesday")]), None);
        assert_eq!(expires_at(&[("expires", "-1")]), None);
    }

    #[test]
    fn extract_max_age_marker_values() {
        assert_eq!(extract_max_age("max-age=-1"), Some(-1));
        assert_eq!(extract_max_age("max-age=-9999"), Some(-1));
        assert_eq!(extract_max_age("max-age=3600"), Some(3600));
        assert_eq!(extract_max_age("foo, max-age=15, bar"), Some(15));
        assert_eq!(extract_max_age("max-age="), None);
        assert_eq!(extract_max_age("max-age= 60"), None);
        assert_eq!(extract_max_age("no-store"), None);
    }
}
