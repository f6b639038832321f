//! GA cookie parsing.
//!
//! This module is the fallback half of identifier resolution:
//!
//! - **Sources**: where the cookie string comes from ([`CookieSource`](source::CookieSource),
//!   [`DocumentCookies`](source::DocumentCookies))
//! - **Records**: typed `_ga` / `_ga_<container>` values ([`gacookie`])
//! - **Reader**: name lookup, decoding and the identifier accessors
//!   ([`CookieReader`](reader::CookieReader))
//!
//! # Example
//!
//! ```rust
//! use gaident::cookies::reader::CookieReader;
//! use gaident::cookies::source::DocumentCookies;
//! use std::sync::Arc;
//!
//! let cookies = DocumentCookies::from_header("_ga=GA1.2.1234567890.1111111111; _ga_ABCDEF1234=GS1.1.9988.5");
//! let reader = CookieReader::new(Arc::new(cookies));
//!
//! assert_eq!(reader.client_id_from_cookie(), "1234567890.1111111111");
//! assert_eq!(reader.session_id_from_cookie("G-ABCDEF1234"), "9988");
//! ```

pub mod gacookie;
pub mod reader;
pub mod source;
