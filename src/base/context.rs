//! Ergonomic helpers for collapsing results into identifier strings.
//!
//! Identifier lookups never surface errors to the caller. These extension
//! traits turn a `Result<String, IdentError>` into the empty-string
//! convention while still logging what went wrong.

use crate::base::identerror::IdentError;

/// Extension trait for collapsing identifier results.
pub trait ResultExt {
    /// Return the value, or an empty string on error.
    ///
    /// Expected degradations (missing cookie, timeout, ...) are logged at
    /// debug level, anything else as a warning.
    ///
    /// # Example
    /// ```ignore
    /// use gaident::base::context::ResultExt;
    ///
    /// let client_id = reader.client_cookie().map(|c| c.client_id).or_empty("client_id");
    /// ```
    fn or_empty(self, what: &str) -> String;
}

impl ResultExt for Result<String, IdentError> {
    fn or_empty(self, what: &str) -> String {
        match self {
            Ok(value) => value,
            Err(e) => {
                log_degradation(what, &e);
                String::new()
            }
        }
    }
}

pub(crate) fn log_degradation(what: &str, error: &IdentError) {
    if error.is_expected() {
        tracing::debug!(what = %what, code = error.as_i32(), error = %error, "identifier lookup degraded");
    } else {
        tracing::warn!(what = %what, code = error.as_i32(), error = %error, "identifier lookup failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_empty_passes_value_through() {
        let result: Result<String, IdentError> = Ok("1234.5678".to_string());
        assert_eq!(result.or_empty("client_id"), "1234.5678");
    }

    #[test]
    fn test_or_empty_on_expected_error() {
        let result: Result<String, IdentError> = Err(IdentError::cookie_not_found("_ga"));
        assert_eq!(result.or_empty("client_id"), "");
    }

    #[test]
    fn test_or_empty_on_failure() {
        let result: Result<String, IdentError> = Err(IdentError::live_call_failed("boom"));
        assert_eq!(result.or_empty("session_id"), "");
    }
}
