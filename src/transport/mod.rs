//! Transport module
//!
//! Serves the API router over HTTP.

pub mod http;

pub use http::{DEFAULT_HTTP_PORT, HttpConfig, run_http, run_http_blocking};
