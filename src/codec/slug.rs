//! Readable URL slugs for item titles

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters a full-URI encoder leaves alone
const URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Turn a title into a URL slug
///
/// ```
/// use sievr::codec::slugify;
///
/// assert_eq!(slugify("Hello Rust World"), "hello-rust-world");
/// assert_eq!(slugify("Café Notes"), "caf%C3%A9-notes");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().replace(' ', "-");
    utf8_percent_encode(&lowered, URI).to_string()
}

/// Turn a slug back into readable text
///
/// Dashes become spaces, so titles that contained dashes do not come back
/// exactly; case is not restored either.
#[must_use]
pub fn unslugify(slug: &str) -> String {
    percent_decode_str(slug)
        .decode_utf8_lossy()
        .replace('-', " ")
}
