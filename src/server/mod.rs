//! HTTP API server
//!
//! Axum handlers over the access decision engine, the competition store and
//! the event sync engine.

pub mod extract;
pub mod routes;
pub mod state;

pub use extract::Caller;
pub use routes::{API_PREFIX, router};
pub use state::AppState;
