//! Relative URL resolution.
//!
//! Pages under load tests are full of relative references (stylesheets,
//! scripts, redirect targets) that have to be resolved against the page
//! URL before they can be fetched. Resolution is plain RFC 3986 via the
//! `url` crate, with one shortcut: a `//host/...` reference only inherits
//! the base scheme.
//!
//! The failure log line goes through an injectable [`ResolveLog`] rather
//! than a hidden global, so tests can swap in a recording or no-op logger.
//! The default forwards to the `log` facade.

use url::{ParseError, Url};

/// Where resolution failures are reported.
pub trait ResolveLog: Send + Sync {
    fn resolution_failed(&self, base: &Url, reference: &str, error: &ParseError);
}

/// Default [`ResolveLog`] that emits through the `log` facade.
#[derive(Debug, Default)]
pub struct FacadeLog;

impl ResolveLog for FacadeLog {
    fn resolution_failed(&self, base: &Url, reference: &str, error: &ParseError) {
        log::info!("Failed to resolve url, base='{base}' relative='{reference}': {error}");
    }
}

/// Resolves relative references against a base URL.
pub struct UrlResolver {
    logger: Box<dyn ResolveLog>,
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlResolver {
    pub fn new() -> Self {
        Self {
            logger: Box::new(FacadeLog),
        }
    }

    pub fn with_logger(logger: Box<dyn ResolveLog>) -> Self {
        Self { logger }
    }

    /// Resolves `reference` against `base`. A reference starting with `//`
    /// is scheme-relative and picks up only the base scheme; anything else
    /// goes through standard base+reference resolution.
    pub fn resolve(&self, base: &Url, reference: &str) -> Result<Url, ParseError> {
        if reference.starts_with("//") {
            Url::parse(&format!("{}:{}", base.scheme(), reference))
        } else {
            base.join(reference)
        }
    }

    /// Like [`resolve`](Self::resolve), but absorbs the failure: one
    /// info-severity line with both inputs, then `None`.
    pub fn try_resolve(&self, base: &Url, reference: &str) -> Option<Url> {
        match self.resolve(base, reference) {
            Ok(url) => Some(url),
            Err(error) => {
                self.logger.resolution_failed(base, reference, &error);
                None
            }
        }
    }
}
