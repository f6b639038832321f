//! Adapting the callback-based live API into a future.
//!
//! The callback feeds a `oneshot` channel, so a request settles at most
//! once. A late callback (after the caller gave up waiting) sends into a
//! closed channel and is discarded.

use crate::base::context::ResultExt;
use crate::base::identerror::IdentError;
use crate::live::api::{value_to_identifier, LiveApi, LiveCallback, LiveField};
use crate::live::environment::AnalyticsEnvironment;
use serde_json::Value;
use tokio::sync::oneshot;

/// Ask the live API for `field` and wait for the callback.
///
/// - A falsy value resolves to `""`.
/// - A synchronous failure of the call is logged and resolves to `""`,
///   unless the callback already delivered a value before the failure.
/// - A callback dropped without firing is `Err(CallbackDropped)`; callers
///   treat it as a failed request.
pub async fn request_field(
    api: &dyn LiveApi,
    measurement_id: &str,
    field: LiveField,
) -> Result<String, IdentError> {
    let (tx, mut rx) = oneshot::channel();
    let callback: LiveCallback = Box::new(move |value: Value| {
        // Receiver gone means the request already timed out
        let _ = tx.send(value);
    });

    if let Err(e) = api.get(measurement_id, field, callback) {
        if let Ok(value) = rx.try_recv() {
            return Ok(value_to_identifier(&value));
        }
        tracing::warn!(
            measurement_id = %measurement_id,
            field = %field,
            error = %e,
            "live analytics call failed"
        );
        return Ok(String::new());
    }

    let value = rx.await.map_err(|_| IdentError::CallbackDropped)?;
    Ok(value_to_identifier(&value))
}

async fn live_value(env: &AnalyticsEnvironment, measurement_id: &str, field: LiveField) -> String {
    let result = match env.live_api() {
        Some(api) => request_field(api.as_ref(), measurement_id, field).await,
        None => Err(IdentError::LiveApiUnavailable),
    };
    result.or_empty(field.as_str())
}

/// Client id straight from the live API, or `""`. Never fails.
///
/// This does not bound the wait; use the resolver for a timeout.
pub async fn get_client_id_from_live_api(env: &AnalyticsEnvironment, measurement_id: &str) -> String {
    live_value(env, measurement_id, LiveField::ClientId).await
}

/// Session id straight from the live API, or `""`. Never fails.
pub async fn get_session_id_from_live_api(
    env: &AnalyticsEnvironment,
    measurement_id: &str,
) -> String {
    live_value(env, measurement_id, LiveField::SessionId).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn env_with(api: Arc<dyn LiveApi>) -> AnalyticsEnvironment {
        AnalyticsEnvironment::new(Arc::new("")).with_live_api(api)
    }

    #[tokio::test]
    async fn test_request_resolves_with_value() {
        let api = |_: &str, _: LiveField, cb: LiveCallback| {
            cb(json!("111.222"));
            Ok::<(), IdentError>(())
        };
        let value = request_field(&api, "G-ABC", LiveField::ClientId).await;
        assert_eq!(value, Ok("111.222".to_string()));
    }

    #[tokio::test]
    async fn test_request_passes_measurement_id_and_field() {
        let api = |id: &str, field: LiveField, cb: LiveCallback| {
            cb(json!(format!("{}:{}", id, field)));
            Ok::<(), IdentError>(())
        };
        let value = request_field(&api, "G-ABC", LiveField::SessionId).await;
        assert_eq!(value, Ok("G-ABC:session_id".to_string()));
    }

    #[tokio::test]
    async fn test_sync_failure_resolves_empty() {
        let api = |_: &str, _: LiveField, _: LiveCallback| {
            Err::<(), IdentError>(IdentError::live_call_failed("gtag is not a function"))
        };
        let value = request_field(&api, "G-ABC", LiveField::ClientId).await;
        assert_eq!(value, Ok(String::new()));
    }

    #[tokio::test]
    async fn test_value_delivered_before_failure_wins() {
        let api = |_: &str, _: LiveField, cb: LiveCallback| {
            cb(json!("333.444"));
            Err::<(), IdentError>(IdentError::live_call_failed("late throw"))
        };
        let value = request_field(&api, "G-ABC", LiveField::ClientId).await;
        assert_eq!(value, Ok("333.444".to_string()));
    }

    #[tokio::test]
    async fn test_dropped_callback_is_error() {
        let api = |_: &str, _: LiveField, cb: LiveCallback| {
            drop(cb);
            Ok::<(), IdentError>(())
        };
        let value = request_field(&api, "G-ABC", LiveField::ClientId).await;
        assert_eq!(value, Err(IdentError::CallbackDropped));
    }

    #[tokio::test]
    async fn test_public_wrappers_never_fail() {
        let api: Arc<dyn LiveApi> = Arc::new(|_: &str, _: LiveField, cb: LiveCallback| {
            drop(cb);
            Ok::<(), IdentError>(())
        });
        let env = env_with(api);
        assert_eq!(get_client_id_from_live_api(&env, "G-ABC").await, "");

        let env = AnalyticsEnvironment::new(Arc::new(""));
        assert_eq!(get_session_id_from_live_api(&env, "G-ABC").await, "");
    }

    #[tokio::test]
    async fn test_numeric_session_id() {
        let api: Arc<dyn LiveApi> = Arc::new(|_: &str, _: LiveField, cb: LiveCallback| {
            cb(json!(1700000000u64));
            Ok::<(), IdentError>(())
        });
        let env = env_with(api);
        assert_eq!(get_session_id_from_live_api(&env, "G-ABC").await, "1700000000");
    }
}
