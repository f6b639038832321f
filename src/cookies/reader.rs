//! Reading GA identifiers out of a cookie string.

use crate::base::context::ResultExt;
use crate::base::identerror::IdentError;
use crate::cookies::gacookie::{
    self, ClientCookie, SessionCookie, CLIENT_COOKIE_NAME, MEASUREMENT_ID_PREFIX,
    SESSION_COOKIE_PREFIX,
};
use crate::cookies::source::CookieSource;
use cookie::Cookie;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::Arc;

/// Cookie naming scheme used to locate GA cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieNames {
    pub client_cookie: String,
    pub session_prefix: String,
    pub measurement_prefix: String,
}

impl Default for CookieNames {
    fn default() -> Self {
        Self {
            client_cookie: CLIENT_COOKIE_NAME.to_string(),
            session_prefix: SESSION_COOKIE_PREFIX.to_string(),
            measurement_prefix: MEASUREMENT_ID_PREFIX.to_string(),
        }
    }
}

/// Reads GA cookies from a [`CookieSource`].
///
/// Every call reads the source afresh.
#[derive(Clone)]
pub struct CookieReader {
    source: Arc<dyn CookieSource>,
    names: CookieNames,
}

impl CookieReader {
    pub fn new(source: Arc<dyn CookieSource>) -> Self {
        Self {
            source,
            names: CookieNames::default(),
        }
    }

    pub fn with_names(mut self, names: CookieNames) -> Self {
        self.names = names;
        self
    }

    pub fn names(&self) -> &CookieNames {
        &self.names
    }

    /// Look up a cookie by name and percent-decode its value.
    ///
    /// The name is matched literally; regex metacharacters are escaped.
    /// Pairs may be separated by `;` with or without surrounding whitespace.
    pub fn read(&self, name: &str) -> Result<String, IdentError> {
        let pattern = format!(r"(?:^|;)\s*{}\s*=([^;]+)", regex::escape(name));
        let re = Regex::new(&pattern).map_err(|e| IdentError::InvalidCookiePattern {
            reason: e.to_string(),
        })?;

        let cookies = self.source.cookie_string();
        let raw = re
            .captures(&cookies)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| IdentError::cookie_not_found(name))?;

        Ok(decode_value(name, raw))
    }

    /// Decoded value of the named cookie, or an empty string when absent.
    pub fn get_cookie(&self, name: &str) -> String {
        self.read(name).or_empty(name)
    }

    /// Parsed client cookie.
    pub fn client_cookie(&self) -> Result<ClientCookie, IdentError> {
        let name = &self.names.client_cookie;
        let value = self.read(name)?;
        ClientCookie::parse(name, &value)
    }

    /// Parsed session cookie for a measurement id.
    pub fn session_cookie(&self, measurement_id: &str) -> Result<SessionCookie, IdentError> {
        let name = self.session_cookie_name(measurement_id);
        let value = self.read(&name)?;
        SessionCookie::parse(&name, &value)
    }

    pub fn session_cookie_name(&self, measurement_id: &str) -> String {
        gacookie::session_cookie_name(
            &self.names.session_prefix,
            &self.names.measurement_prefix,
            measurement_id,
        )
    }

    /// Client id from the `_ga` cookie, or an empty string.
    pub fn client_id_from_cookie(&self) -> String {
        self.client_cookie()
            .map(|c| c.client_id)
            .or_empty("client_id")
    }

    /// Session id from the measurement id's session cookie, or an empty string.
    pub fn session_id_from_cookie(&self, measurement_id: &str) -> String {
        self.session_cookie(measurement_id)
            .map(|c| c.session_id)
            .or_empty("session_id")
    }

    /// Measurement ids that currently have a session cookie, sorted.
    pub fn session_measurement_ids(&self) -> Vec<String> {
        let cookies = self.source.cookie_string();
        let mut ids: Vec<String> = Cookie::split_parse_encoded(cookies)
            .filter_map(|c| c.ok())
            .filter_map(|c| {
                gacookie::measurement_id_from_cookie_name(
                    &self.names.session_prefix,
                    &self.names.measurement_prefix,
                    c.name(),
                )
            })
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// Percent-decode a raw cookie value. Invalid UTF-8 decodes lossily.
fn decode_value(name: &str, raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(value) => value.into_owned(),
        Err(e) => {
            tracing::debug!(cookie = %name, error = %e, "cookie value is not valid UTF-8");
            percent_decode_str(raw).decode_utf8_lossy().into_owned()
        }
    }
}
