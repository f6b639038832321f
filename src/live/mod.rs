//! The live analytics runtime.
//!
//! - [`LiveApi`](api::LiveApi): the injected `gtag('get', ...)` call
//! - [`AnalyticsEnvironment`](environment::AnalyticsEnvironment): injected page state and the availability check
//! - [`request`]: callback-to-future adaptation

pub mod api;
pub mod environment;
pub mod request;
