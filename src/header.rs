use std::borrow::{Borrow, Cow};
use std::collections::HashMap;

/// A header field name in canonical form: first letter and every letter
/// after a `-` uppercase, all other letters lowercase (`Content-Type`).
/// Names containing bytes outside the RFC 7230 token alphabet are kept
/// as-is rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeaderName(String);

impl HeaderName {
    pub fn from_str(src: &str) -> Self {
        Self(canonicalize(src).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for HeaderName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Canonicalizes a header field name per RFC 7230 section 8.1 conventions.
///
/// Returns the input borrowed and untouched if it contains any byte
/// outside the token alphabet, or if it is already canonical.
pub fn canonicalize(name: &str) -> Cow<'_, str> {
    let mut upper = true;
    let mut needs_rewrite = false;
    for &c in name.as_bytes() {
        if !is_token_byte(c) {
            return Cow::Borrowed(name);
        }
        if (upper && c.is_ascii_lowercase()) || (!upper && c.is_ascii_uppercase()) {
            needs_rewrite = true;
        }
        upper = c == b'-';
    }
    if !needs_rewrite {
        return Cow::Borrowed(name);
    }

    let mut bytes = name.as_bytes().to_vec();
    let mut upper = true;
    for c in &mut bytes {
        if upper {
            c.make_ascii_uppercase();
        } else {
            c.make_ascii_lowercase();
        }
        upper = *c == b'-';
    }
    // all token bytes are ASCII, so this cannot split a code point
    Cow::Owned(bytes.into_iter().map(char::from).collect())
}

/// RFC 7230 `tchar`: letters, digits, and `!#$%&'*+-.^_`|~`.
fn is_token_byte(c: u8) -> bool {
    matches!(c,
        b'a'..=b'z'
        | b'A'..=b'Z'
        | b'0'..=b'9'
        | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
        | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~')
}

/// Header fields of a single request, keyed by canonical name.
/// Last write wins; insertion order is not preserved.
#[derive(Debug, Default)]
pub struct HeaderMap(HashMap<HeaderName, String>);

impl HeaderMap {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add<V: Into<String>>(&mut self, name: &str, value: V) {
        self.0.insert(HeaderName::from_str(name), value.into());
    }

    /// Looks up a field by name in any casing. An empty map is a legal
    /// query target and answers `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(canonicalize(name).as_ref()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_mixed_casings() {
        assert_eq!(canonicalize("user-agent"), "User-Agent");
        assert_eq!(canonicalize("HOST"), "Host");
        assert_eq!(canonicalize("X-MY-Header"), "X-My-Header");
        assert_eq!(canonicalize("content-length"), "Content-Length");
    }

    #[test]
    fn already_canonical_names_are_borrowed() {
        assert!(matches!(canonicalize("User-Agent"), Cow::Borrowed(_)));
        assert!(matches!(canonicalize("Host"), Cow::Borrowed(_)));
        // non-alphabetic bytes have no case to fix
        assert!(matches!(canonicalize("X-2-Fast"), Cow::Borrowed(_)));
    }

    #[test]
    fn idempotent_on_valid_names() {
        for name in ["user-agent", "HOST", "X-MY-Header", "accept-ENCODING"] {
            let once = canonicalize(name).into_owned();
            let twice = canonicalize(&once).into_owned();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn non_token_bytes_pass_through_unchanged() {
        for name in ["user agent", "head(er", "na,me", "quo\"te", "über"] {
            assert_eq!(canonicalize(name), name);
            assert!(matches!(canonicalize(name), Cow::Borrowed(_)));
        }
    }

    #[test]
    fn get_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.add("user-agent", "curl/8.0");
        assert_eq!(headers.get("User-Agent"), Some("curl/8.0"));
        assert_eq!(headers.get("USER-AGENT"), Some("curl/8.0"));
        assert_eq!(headers.get("user-agent"), Some("curl/8.0"));
    }

    #[test]
    fn last_add_wins() {
        let mut headers = HeaderMap::new();
        headers.add("Accept", "text/html");
        headers.add("ACCEPT", "text/plain");
        assert_eq!(headers.get("accept"), Some("text/plain"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn get_on_empty_map_is_none() {
        let headers = HeaderMap::default();
        assert_eq!(headers.get("Host"), None);
    }
}
