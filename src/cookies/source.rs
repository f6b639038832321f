//! Where cookie strings come from.
//!
//! The resolver never touches a global cookie store. Callers hand it a
//! [`CookieSource`] which produces a `document.cookie` shaped string
//! (`name=value; name2=value2`) every time it is asked.

use cookie::CookieJar;

/// A provider of the page's cookie string.
///
/// Implementations must return the current state on every call; readers do
/// not cache.
pub trait CookieSource: Send + Sync {
    fn cookie_string(&self) -> String;
}

impl CookieSource for String {
    fn cookie_string(&self) -> String {
        self.clone()
    }
}

impl CookieSource for &'static str {
    fn cookie_string(&self) -> String {
        (*self).to_string()
    }
}

/// Values are percent-encoded the way a browser would expose them.
impl CookieSource for CookieJar {
    fn cookie_string(&self) -> String {
        self.iter()
            .map(|c| c.stripped().encoded().to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A snapshot of a page's cookies.
///
/// Built either from a raw `Cookie` request header or from a jar, so the
/// resolver can run outside a browser (e.g. on a server receiving the
/// visitor's cookies).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentCookies {
    raw: String,
}

impl DocumentCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a `Cookie` header value verbatim.
    pub fn from_header(header: impl Into<String>) -> Self {
        Self { raw: header.into() }
    }

    /// Join several `Cookie` header values (HTTP/2 may split them).
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw = headers
            .into_iter()
            .map(|h| h.as_ref().trim().to_string())
            .filter(|h| !h.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        Self { raw }
    }

    pub fn from_jar(jar: &CookieJar) -> Self {
        Self {
            raw: jar.cookie_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

impl CookieSource for DocumentCookies {
    fn cookie_string(&self) -> String {
        self.raw.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookie::Cookie;

    #[test]
    fn test_from_headers_joins_values() {
        let cookies = DocumentCookies::from_headers(["_ga=GA1.2.1.2", "", " _gid=GA1.2.3.4 "]);
        assert_eq!(cookies.as_str(), "_ga=GA1.2.1.2; _gid=GA1.2.3.4");
    }

    #[test]
    fn test_jar_is_percent_encoded() {
        let mut jar = CookieJar::new();
        jar.add_original(Cookie::new("pref", "a b"));
        let cookies = DocumentCookies::from_jar(&jar);
        assert_eq!(cookies.as_str(), "pref=a%20b");
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(DocumentCookies::new().is_empty());
        assert!(DocumentCookies::from_header("  ").is_empty());
        assert!(!DocumentCookies::from_header("_ga=1").is_empty());
    }
}
