//! URL-encoded form body decoding.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// One decoded form field. Order and duplicates are significant for
/// replay, so bodies decode to a sequence of these, never a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decodes an `application/x-www-form-urlencoded` body.
///
/// Raw split semantics: every `&`-separated segment yields a field, the
/// part after the first `=` is the value (empty when there is no `=`), and
/// both parts are percent-decoded as UTF-8. Nothing is filtered, so an
/// empty body yields one empty field.
pub fn decode_form_body(body: &str) -> Vec<FormField> {
    body.split('&')
        .map(|segment| {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            FormField::new(utf8_decode(name), utf8_decode(value))
        })
        .collect()
}

fn utf8_decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}
