use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum IdentError {
    // Live API Errors
    #[error("Live analytics API unavailable")]
    LiveApiUnavailable,
    #[error("Live analytics call failed: {reason}")]
    LiveCallFailed { reason: String },
    #[error("Live analytics callback dropped before firing")]
    CallbackDropped,
    #[error("Live analytics call timed out after {timeout_ms}ms")]
    LiveCallTimedOut { timeout_ms: u64 },

    // Cookie Errors
    #[error("Cookie {name} not found")]
    CookieNotFound { name: String },
    #[error("Cookie {name} has {found} fields, expected at least {expected}")]
    CookieMalformed {
        name: String,
        found: usize,
        expected: usize,
    },
    #[error("Invalid cookie name pattern: {reason}")]
    InvalidCookiePattern { reason: String },

    // Configuration Errors
    #[error("Invalid resolver configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown error code {0}")]
    Unknown(i32),
}

impl IdentError {
    pub fn live_call_failed(reason: impl Into<String>) -> Self {
        IdentError::LiveCallFailed {
            reason: reason.into(),
        }
    }

    pub fn cookie_not_found(name: impl Into<String>) -> Self {
        IdentError::CookieNotFound { name: name.into() }
    }

    pub fn cookie_malformed(name: impl Into<String>, found: usize, expected: usize) -> Self {
        IdentError::CookieMalformed {
            name: name.into(),
            found,
            expected,
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        IdentError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Whether this is an ordinary degradation rather than a failure.
    ///
    /// Expected errors are logged at debug level; everything else is a warning.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            IdentError::LiveApiUnavailable
                | IdentError::LiveCallTimedOut { .. }
                | IdentError::CookieNotFound { .. }
                | IdentError::CookieMalformed { .. }
        )
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            IdentError::LiveApiUnavailable => -100,
            IdentError::LiveCallFailed { .. } => -101,
            IdentError::CallbackDropped => -102,
            IdentError::LiveCallTimedOut { .. } => -103,

            IdentError::CookieNotFound { .. } => -200,
            IdentError::CookieMalformed { .. } => -201,
            IdentError::InvalidCookiePattern { .. } => -202,

            IdentError::InvalidConfig { .. } => -300,
            IdentError::Unknown(code) => *code,
        }
    }
}

/// Codes carrying context only restore the kind; the detail fields are left empty.
impl From<i32> for IdentError {
    fn from(code: i32) -> Self {
        match code {
            -100 => IdentError::LiveApiUnavailable,
            -101 => IdentError::live_call_failed(""),
            -102 => IdentError::CallbackDropped,
            -103 => IdentError::LiveCallTimedOut { timeout_ms: 0 },

            -200 => IdentError::cookie_not_found(""),
            -201 => IdentError::cookie_malformed("", 0, 0),
            -202 => IdentError::InvalidCookiePattern {
                reason: String::new(),
            },

            -300 => IdentError::invalid_config(""),
            _ => IdentError::Unknown(code),
        }
    }
}
