//! Google Analytics cookie records.
//!
//! GA4 keeps its identifiers in two first-party cookies:
//!
//! | Cookie | Example value | Fields |
//! |--------|---------------|--------|
//! | `_ga` | `GA1.2.1234567890.1111111111` | version, domain depth, random, first-seen timestamp |
//! | `_ga_<container>` | `GS1.1.9988.5.1.1700000000.0.0.0` | version, domain depth, session id, session count, ... |
//!
//! The client id is the random/timestamp pair joined by `.`; the session id
//! is the third field of the session cookie.

use crate::base::identerror::IdentError;

/// Default name of the top-level client cookie.
pub const CLIENT_COOKIE_NAME: &str = "_ga";

/// Default prefix of per-container session cookies.
pub const SESSION_COOKIE_PREFIX: &str = "_ga_";

/// Default prefix of GA4 measurement ids.
pub const MEASUREMENT_ID_PREFIX: &str = "G-";

const CLIENT_COOKIE_MIN_FIELDS: usize = 4;
const SESSION_COOKIE_MIN_FIELDS: usize = 3;

/// Parsed `_ga` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCookie {
    /// Format version, e.g. `GA1`.
    pub version: String,
    /// Domain depth marker, e.g. `2`.
    pub domain_depth: String,
    /// `<random>.<timestamp>`
    pub client_id: String,
}

impl ClientCookie {
    /// Parse a raw `_ga` value.
    ///
    /// Fields beyond the fourth are ignored.
    pub fn parse(name: &str, value: &str) -> Result<Self, IdentError> {
        let parts: Vec<&str> = value.split('.').collect();
        if parts.len() < CLIENT_COOKIE_MIN_FIELDS {
            return Err(IdentError::cookie_malformed(
                name,
                parts.len(),
                CLIENT_COOKIE_MIN_FIELDS,
            ));
        }

        Ok(Self {
            version: parts[0].to_string(),
            domain_depth: parts[1].to_string(),
            client_id: format!("{}.{}", parts[2], parts[3]),
        })
    }
}

/// Parsed `_ga_<container>` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Format version, e.g. `GS1`.
    pub version: String,
    pub domain_depth: String,
    pub session_id: String,
    /// Number of sessions seen for this container, when present and numeric.
    pub session_count: Option<u32>,
}

impl SessionCookie {
    pub fn parse(name: &str, value: &str) -> Result<Self, IdentError> {
        let parts: Vec<&str> = value.split('.').collect();
        if parts.len() < SESSION_COOKIE_MIN_FIELDS {
            return Err(IdentError::cookie_malformed(
                name,
                parts.len(),
                SESSION_COOKIE_MIN_FIELDS,
            ));
        }

        Ok(Self {
            version: parts[0].to_string(),
            domain_depth: parts[1].to_string(),
            session_id: parts[2].to_string(),
            session_count: parts.get(3).and_then(|c| c.parse().ok()),
        })
    }
}

/// Build the session cookie name for a measurement id.
///
/// `G-ABCDEF1234` with the default prefixes becomes `_ga_ABCDEF1234`. Ids
/// without the measurement prefix are used as-is.
pub fn session_cookie_name(
    cookie_prefix: &str,
    measurement_prefix: &str,
    measurement_id: &str,
) -> String {
    let container = measurement_id
        .strip_prefix(measurement_prefix)
        .unwrap_or(measurement_id);
    format!("{}{}", cookie_prefix, container)
}

/// Inverse of [`session_cookie_name`]: recover the measurement id from a
/// session cookie name, if it is one.
pub fn measurement_id_from_cookie_name(
    cookie_prefix: &str,
    measurement_prefix: &str,
    cookie_name: &str,
) -> Option<String> {
    let container = cookie_name.strip_prefix(cookie_prefix)?;
    if container.is_empty() {
        return None;
    }
    Some(format!("{}{}", measurement_prefix, container))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_cookie() {
        let cookie = ClientCookie::parse("_ga", "GA1.2.1234567890.1111111111").unwrap();
        assert_eq!(cookie.version, "GA1");
        assert_eq!(cookie.domain_depth, "2");
        assert_eq!(cookie.client_id, "1234567890.1111111111");
    }

    #[test]
    fn test_parse_client_cookie_extra_fields() {
        let cookie = ClientCookie::parse("_ga", "GA1.3.42.99.extra").unwrap();
        assert_eq!(cookie.client_id, "42.99");
    }

    #[test]
    fn test_parse_client_cookie_too_short() {
        let err = ClientCookie::parse("_ga", "GA1.2").unwrap_err();
        assert_eq!(err, IdentError::cookie_malformed("_ga", 2, 4));
    }

    #[test]
    fn test_parse_session_cookie() {
        let cookie = SessionCookie::parse("_ga_ABC", "GS1.1.9988.5").unwrap();
        assert_eq!(cookie.version, "GS1");
        assert_eq!(cookie.session_id, "9988");
        assert_eq!(cookie.session_count, Some(5));
    }

    #[test]
    fn test_parse_session_cookie_minimal() {
        let cookie = SessionCookie::parse("_ga_ABC", "GS1.1.9988").unwrap();
        assert_eq!(cookie.session_id, "9988");
        assert_eq!(cookie.session_count, None);

        assert!(SessionCookie::parse("_ga_ABC", "GS1.1").is_err());
    }

    #[test]
    fn test_session_cookie_name() {
        assert_eq!(
            session_cookie_name(SESSION_COOKIE_PREFIX, MEASUREMENT_ID_PREFIX, "G-ABCDEF1234"),
            "_ga_ABCDEF1234"
        );
        // Only a leading prefix is stripped
        assert_eq!(
            session_cookie_name(SESSION_COOKIE_PREFIX, MEASUREMENT_ID_PREFIX, "XG-1"),
            "_ga_XG-1"
        );
    }

    #[test]
    fn test_measurement_id_from_cookie_name() {
        assert_eq!(
            measurement_id_from_cookie_name(SESSION_COOKIE_PREFIX, MEASUREMENT_ID_PREFIX, "_ga_ABC"),
            Some("G-ABC".to_string())
        );
        assert_eq!(
            measurement_id_from_cookie_name(SESSION_COOKIE_PREFIX, MEASUREMENT_ID_PREFIX, "_ga"),
            None
        );
        assert_eq!(
            measurement_id_from_cookie_name(SESSION_COOKIE_PREFIX, MEASUREMENT_ID_PREFIX, "_ga_"),
            None
        );
    }
}
