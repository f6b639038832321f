//! # gaident
//!
//! Resolve Google Analytics 4 identifiers for a visitor.
//!
//! `gaident` returns the GA4 client id and session id for a measurement id.
//! It asks the live `gtag` runtime first and falls back to parsing the `_ga`
//! cookies when the runtime is missing, fails, or does not answer in time.
//!
//! ## Features
//!
//! - **Live first**: `gtag('get', ...)` raced against a timeout (2s default)
//! - **Cookie fallback**: `_ga` and `_ga_<container>` parsing with percent-decoding
//! - **Provenance**: every value is tagged `live-api`, `cookie` or `not-found`
//! - **Never fails**: errors degrade to empty strings and are logged via `tracing`
//! - **Injected environment**: no globals; the runtime and cookies are passed in
//!
//! ## Quick Start
//!
//! ```rust
//! use gaident::cookies::source::DocumentCookies;
//! use gaident::live::environment::AnalyticsEnvironment;
//! use gaident::resolver::identifiers::IdentifierSource;
//! use gaident::resolver::resolve::get_ga4_identifiers;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cookies = DocumentCookies::from_header("_ga=GA1.2.1234567890.1111111111");
//!     let env = AnalyticsEnvironment::new(Arc::new(cookies));
//!
//!     let ids = get_ga4_identifiers(&env, "G-ABCDEF1234", None).await;
//!     assert_eq!(ids.client_id, "1234567890.1111111111");
//!     assert_eq!(ids.source.client_id, IdentifierSource::Cookie);
//!     assert_eq!(ids.source.session_id, IdentifierSource::NotFound);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and result helpers
//! - [`cookies`] - Cookie sources, GA cookie records and the cookie reader
//! - [`live`] - The injected live API and its callback adaptation
//! - [`resolver`] - Live-then-cookie resolution and the public accessors

pub mod base;
pub mod cookies;
pub mod live;
pub mod resolver;
