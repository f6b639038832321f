//! Base types and error handling.
//!
//! - [`IdentError`](identerror::IdentError): failure kinds with stable numeric codes
//! - [`ResultExt`](context::ResultExt): collapsing results into the empty-string convention

pub mod context;
pub mod identerror;
