//! wcif-gate
//!
//! A competitions API guarded by a dual-principal access model, with atomic
//! replacement of a competition's WCIF event list.
//!
//! ## Access Model
//!
//! A request may carry a session principal, a token principal, or both:
//!
//! ```text
//! can_manage = (session AND owns) OR (token AND owns AND token has scope)
//! ```
//!
//! - Ownership is decided by an injected oracle (delegate, trainee delegate,
//!   organizer, or a global manager role)
//! - Hidden competitions are only disclosed to callers who can manage them;
//!   everyone else gets the same "not found" as for an absent id
//! - Session callers must present their CSRF token on state-changing requests
//!
//! ## Event Synchronization
//!
//! `PUT /api/v0/competitions/{id}/wcif/events` validates the payload against
//! a JSON Schema, converts it into domain events and swaps the whole event
//! set in under a per-competition lock. Any failure leaves the previous set
//! in place.
//!
//! ## Example Configuration
//!
//! ```toml
//! [server]
//! port = 20290
//!
//! [access_control]
//! manage_scope = "manage_competitions"
//!
//! [[auth.users]]
//! id = 1
//! name = "Delegate One"
//!
//! [[auth.tokens]]
//! token = "secret-token"
//! user_id = 1
//! scopes = ["public", "manage_competitions"]
//!
//! [store]
//! seed_path = "competitions.json"
//! ```

pub mod access_control;
pub mod auth;
pub mod competition;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod transport;
pub mod util;
pub mod wcif;

// Re-export main types
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
pub use server::{AppState, router};
