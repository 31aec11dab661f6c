//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns: trace correlation and
//! response content negotiation for the JSON API.

pub mod json_content_type;
pub mod trace;

pub use json_content_type::JsonContentType;
pub use trace::Trace;
