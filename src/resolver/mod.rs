//! Identifier resolution.
//!
//! Based on how `gtag` exposes identifiers on a page: the live
//! `gtag('get', ...)` call is authoritative but may never answer (blocked
//! script, consent mode), while the `_ga` cookies are always readable but can
//! lag behind. Resolution prefers the live value, bounded by a timeout, and
//! degrades to cookies.

pub mod config;
pub mod identifiers;
pub mod resolve;
