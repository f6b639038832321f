use serde::Serialize;

/// Which path produced an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierSource {
    /// Read from the live analytics API.
    LiveApi,
    /// Parsed from a cookie.
    Cookie,
    /// Neither path produced a value.
    NotFound,
}

impl IdentifierSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierSource::LiveApi => "live-api",
            IdentifierSource::Cookie => "cookie",
            IdentifierSource::NotFound => "not-found",
        }
    }
}

impl std::fmt::Display for IdentifierSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One identifier together with the path that produced it.
///
/// An empty value is always `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: IdentifierSource,
}

impl Resolved {
    pub fn live(value: String) -> Self {
        Self::tagged(value, IdentifierSource::LiveApi)
    }

    pub fn cookie(value: String) -> Self {
        Self::tagged(value, IdentifierSource::Cookie)
    }

    pub fn not_found() -> Self {
        Self {
            value: String::new(),
            source: IdentifierSource::NotFound,
        }
    }

    fn tagged(value: String, source: IdentifierSource) -> Self {
        if value.is_empty() {
            Self::not_found()
        } else {
            Self { value, source }
        }
    }

    pub fn is_found(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Per-identifier source annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierSources {
    pub client_id: IdentifierSource,
    pub session_id: IdentifierSource,
}

/// Client and session id of a visitor, with provenance.
///
/// Serializes to `{ "clientId": ..., "sessionId": ..., "source": { "clientId": ..., "sessionId": ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ga4Identifiers {
    pub client_id: String,
    pub session_id: String,
    pub source: IdentifierSources,
}

impl Ga4Identifiers {
    pub fn new(client: Resolved, session: Resolved) -> Self {
        Self {
            client_id: client.value,
            session_id: session.value,
            source: IdentifierSources {
                client_id: client.source,
                session_id: session.source,
            },
        }
    }

    /// Both identifiers were found.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.session_id.is_empty()
    }
}
