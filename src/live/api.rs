//! The injected analytics runtime.
//!
//! In a page this is `gtag('get', measurementId, field, callback)`. Here it is
//! a trait so hosts can bridge to a real runtime and tests can script one.

use crate::base::identerror::IdentError;
use serde_json::Value;

/// A property readable through the live API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveField {
    ClientId,
    SessionId,
}

impl LiveField {
    /// Field name as understood by `gtag('get', ...)`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveField::ClientId => "client_id",
            LiveField::SessionId => "session_id",
        }
    }
}

impl std::fmt::Display for LiveField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives the value of a `get` call. Called at most once.
pub type LiveCallback = Box<dyn FnOnce(Value) + Send + 'static>;

/// Callback-based "get property" call of the analytics runtime.
///
/// Returning `Err` models the call failing synchronously. An implementation
/// may also never invoke the callback (e.g. the script was blocked); callers
/// bound the wait themselves.
pub trait LiveApi: Send + Sync {
    fn get(
        &self,
        measurement_id: &str,
        field: LiveField,
        callback: LiveCallback,
    ) -> Result<(), IdentError>;
}

impl<F> LiveApi for F
where
    F: Fn(&str, LiveField, LiveCallback) -> Result<(), IdentError> + Send + Sync,
{
    fn get(
        &self,
        measurement_id: &str,
        field: LiveField,
        callback: LiveCallback,
    ) -> Result<(), IdentError> {
        self(measurement_id, field, callback)
    }
}

/// Render a live value as an identifier, mapping falsy values to `""`.
///
/// `gtag` reports `client_id` as a string and `session_id` as a number.
pub fn value_to_identifier(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Null | Value::Bool(false) => String::new(),
        // Objects and arrays are never identifiers
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}
