//! Resolver configuration.

use crate::base::identerror::IdentError;
use crate::cookies::gacookie::{CLIENT_COOKIE_NAME, MEASUREMENT_ID_PREFIX, SESSION_COOKIE_PREFIX};
use crate::cookies::reader::CookieNames;
use serde::Deserialize;
use std::time::Duration;

/// Default time to wait for the live API before falling back to cookies.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Configuration for identifier resolution.
///
/// Every field has a default, so partial JSON documents load:
///
/// ```rust
/// use gaident::resolver::config::ResolverConfig;
///
/// let config: ResolverConfig = serde_json::from_str(r#"{ "timeout_ms": 500 }"#).unwrap();
/// assert_eq!(config.timeout_ms, 500);
/// assert_eq!(config.client_cookie_name, "_ga");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Ask the live API before reading cookies (default: true)
    pub prefer_live: bool,
    /// How long to wait for the live API in milliseconds (default: 2000)
    pub timeout_ms: u64,
    /// Client cookie name (default: `_ga`)
    pub client_cookie_name: String,
    /// Session cookie prefix (default: `_ga_`)
    pub session_cookie_prefix: String,
    /// Measurement id prefix stripped when naming session cookies (default: `G-`)
    pub measurement_id_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prefer_live: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            client_cookie_name: CLIENT_COOKIE_NAME.to_string(),
            session_cookie_prefix: SESSION_COOKIE_PREFIX.to_string(),
            measurement_id_prefix: MEASUREMENT_ID_PREFIX.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Skip the live API entirely and read cookies only.
    pub fn cookie_only() -> Self {
        Self {
            prefer_live: false,
            ..Default::default()
        }
    }

    /// A short wait for latency-sensitive callers.
    pub fn fast() -> Self {
        Self {
            timeout_ms: 250,
            ..Default::default()
        }
    }

    /// Set the live API timeout. Sub-millisecond remainders round up, so a
    /// non-zero duration never becomes a zero timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cookie_names(&self) -> CookieNames {
        CookieNames {
            client_cookie: self.client_cookie_name.clone(),
            session_prefix: self.session_cookie_prefix.clone(),
            measurement_prefix: self.measurement_id_prefix.clone(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, IdentError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| IdentError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Cookie names must be usable in a `Cookie` header.
    pub fn validate(&self) -> Result<(), IdentError> {
        if self.client_cookie_name.is_empty() {
            return Err(IdentError::invalid_config("client_cookie_name is empty"));
        }
        if self.session_cookie_prefix.is_empty() {
            return Err(IdentError::invalid_config("session_cookie_prefix is empty"));
        }
        for (field, value) in [
            ("client_cookie_name", &self.client_cookie_name),
            ("session_cookie_prefix", &self.session_cookie_prefix),
        ] {
            if value.contains(|c: char| c == ';' || c == '=' || c.is_whitespace()) {
                return Err(IdentError::invalid_config(format!(
                    "{} contains a separator: {:?}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(2000));
        assert_eq!(config.client_cookie_name, "_ga");
        assert_eq!(config.session_cookie_prefix, "_ga_");
        assert_eq!(config.measurement_id_prefix, "G-");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(ResolverConfig::fast().timeout_ms, 250);
        assert!(ResolverConfig::fast().prefer_live);

        let cookie_only = ResolverConfig::cookie_only();
        assert!(!cookie_only.prefer_live);
        assert_eq!(cookie_only.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_with_timeout() {
        let config = ResolverConfig::default().with_timeout(Duration::from_millis(50));
        assert_eq!(config.timeout_ms, 50);
    }

    #[test]
    fn test_with_timeout_rounds_up_sub_millisecond() {
        let config = ResolverConfig::default().with_timeout(Duration::from_micros(500));
        assert_eq!(config.timeout_ms, 1);

        let config = ResolverConfig::default().with_timeout(Duration::from_micros(2001));
        assert_eq!(config.timeout_ms, 3);

        let config = ResolverConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout_ms, 0);
    }

    #[test]
    fn test_from_json_prefer_live() {
        let config = ResolverConfig::from_json(r#"{"prefer_live": false}"#).unwrap();
        assert_eq!(config, ResolverConfig::cookie_only());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ResolverConfig::from_json(r#"{"session_cookie_prefix": "_gs_"}"#).unwrap();
        assert_eq!(config.session_cookie_prefix, "_gs_");
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ResolverConfig::from_json("{ not json"),
            Err(IdentError::InvalidConfig { .. })
        ));
        assert!(matches!(
            ResolverConfig::from_json(r#"{"client_cookie_name": "a b"}"#),
            Err(IdentError::InvalidConfig { .. })
        ));
        assert!(matches!(
            ResolverConfig::from_json(r#"{"client_cookie_name": ""}"#),
            Err(IdentError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_cookie_names() {
        let names = ResolverConfig::default().cookie_names();
        assert_eq!(names, CookieNames::default());
    }
}
