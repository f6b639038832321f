//! Identifier resolution: live API first, bounded by a timeout, cookies last.
//!
//! ```text
//! is_live_api_available? ──no──────────────────────────────┐
//!        │ yes                                              ▼
//!   race(live get, timeout) ──non-empty──► LiveApi     cookie accessor ──► Cookie / NotFound
//!        │ empty / timeout / failure ──────────────────────▲
//! ```
//!
//! A timed-out live request is abandoned, not cancelled. Its callback may
//! still fire later; the value is dropped.

use crate::base::context::log_degradation;
use crate::base::identerror::IdentError;
use crate::cookies::reader::CookieReader;
use crate::live::api::LiveField;
use crate::live::environment::AnalyticsEnvironment;
use crate::live::request::request_field;
use crate::resolver::config::ResolverConfig;
use crate::resolver::identifiers::{Ga4Identifiers, Resolved};
use std::time::Duration;

/// Resolves GA4 identifiers against one environment.
///
/// Cheap to clone. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    env: AnalyticsEnvironment,
    config: ResolverConfig,
}

impl IdentityResolver {
    pub fn new(env: AnalyticsEnvironment) -> Self {
        Self::with_config(env, ResolverConfig::default())
    }

    pub fn with_config(env: AnalyticsEnvironment, config: ResolverConfig) -> Self {
        Self { env, config }
    }

    pub fn environment(&self) -> &AnalyticsEnvironment {
        &self.env
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cookie_reader(&self) -> CookieReader {
        self.env.cookie_reader(self.config.cookie_names())
    }

    pub fn is_live_api_available(&self, measurement_id: &str) -> bool {
        self.env.is_live_api_available(measurement_id)
    }

    /// Resolve one identifier, recording which path produced it.
    pub async fn resolve(&self, measurement_id: &str, field: LiveField) -> Resolved {
        if self.config.prefer_live && self.is_live_api_available(measurement_id) {
            match self.race_live(measurement_id, field).await {
                Ok(value) if !value.is_empty() => return Resolved::live(value),
                Ok(_) => {
                    tracing::debug!(
                        measurement_id = %measurement_id,
                        field = %field,
                        "live analytics API returned no value, falling back to cookie"
                    );
                }
                Err(e) => log_degradation(field.as_str(), &e),
            }
        }

        Resolved::cookie(self.cookie_value(measurement_id, field))
    }

    async fn race_live(&self, measurement_id: &str, field: LiveField) -> Result<String, IdentError> {
        let api = self.env.live_api().ok_or(IdentError::LiveApiUnavailable)?;
        let timeout = self.config.timeout();

        match tokio::time::timeout(timeout, request_field(api.as_ref(), measurement_id, field)).await
        {
            Ok(result) => result,
            Err(_) => Err(IdentError::LiveCallTimedOut {
                timeout_ms: self.config.timeout_ms,
            }),
        }
    }

    fn cookie_value(&self, measurement_id: &str, field: LiveField) -> String {
        let reader = self.cookie_reader();
        match field {
            LiveField::ClientId => reader.client_id_from_cookie(),
            LiveField::SessionId => reader.session_id_from_cookie(measurement_id),
        }
    }

    pub async fn client_id(&self, measurement_id: &str) -> String {
        self.resolve(measurement_id, LiveField::ClientId).await.value
    }

    pub async fn session_id(&self, measurement_id: &str) -> String {
        self.resolve(measurement_id, LiveField::SessionId).await.value
    }

    /// Resolve both identifiers concurrently.
    pub async fn identifiers(&self, measurement_id: &str) -> Ga4Identifiers {
        let (client, session) = tokio::join!(
            self.resolve(measurement_id, LiveField::ClientId),
            self.resolve(measurement_id, LiveField::SessionId),
        );
        Ga4Identifiers::new(client, session)
    }

    /// Cookie-only resolution. Never touches the live API and never awaits.
    pub fn identifiers_sync(&self, measurement_id: &str) -> Ga4Identifiers {
        let client = self.cookie_value(measurement_id, LiveField::ClientId);
        let session = self.cookie_value(measurement_id, LiveField::SessionId);
        Ga4Identifiers::new(Resolved::cookie(client), Resolved::cookie(session))
    }
}

fn resolver_for(env: &AnalyticsEnvironment, timeout: Option<Duration>) -> IdentityResolver {
    let config = match timeout {
        Some(timeout) => ResolverConfig::default().with_timeout(timeout),
        None => ResolverConfig::default(),
    };
    IdentityResolver::with_config(env.clone(), config)
}

/// Client id: live API within `timeout` (default 2s), else the `_ga` cookie, else `""`.
pub async fn get_client_id(
    env: &AnalyticsEnvironment,
    measurement_id: &str,
    timeout: Option<Duration>,
) -> String {
    resolver_for(env, timeout).client_id(measurement_id).await
}

/// Session id: live API within `timeout` (default 2s), else the session cookie, else `""`.
pub async fn get_session_id(
    env: &AnalyticsEnvironment,
    measurement_id: &str,
    timeout: Option<Duration>,
) -> String {
    resolver_for(env, timeout).session_id(measurement_id).await
}

/// Both identifiers, resolved concurrently, with their sources.
pub async fn get_ga4_identifiers(
    env: &AnalyticsEnvironment,
    measurement_id: &str,
    timeout: Option<Duration>,
) -> Ga4Identifiers {
    resolver_for(env, timeout).identifiers(measurement_id).await
}

/// Both identifiers from cookies only.
pub fn get_ga4_identifiers_sync(env: &AnalyticsEnvironment, measurement_id: &str) -> Ga4Identifiers {
    resolver_for(env, None).identifiers_sync(measurement_id)
}
