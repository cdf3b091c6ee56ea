//! Access control module
//!
//! Decides whether the principals on a request may manage, or even see, a
//! competition.
//!
//! ## Access Control Model
//!
//! A request carries up to two principals:
//!
//! - a **session** principal (interactive login), authorized by ownership alone
//! - a **token** principal (OAuth), authorized by ownership AND the
//!   `manage_competitions` scope
//!
//! Either principal being authorized is enough. Ownership is answered by a
//! pluggable [`OwnershipOracle`]; the default [`RoleOwnership`] grants it to
//! delegates and organizers of the competition and to site-wide managers.
//!
//! Hidden competitions are only disclosed to callers who can manage them.
//! Callers who cannot see a hidden competition get the same `NotFound` they
//! would get for an id that does not exist.
//!
//! ## Example Configuration
//!
//! ```toml
//! [access_control]
//! managing_roles = ["delegate", "organizer"]
//! global_manager_roles = ["admin"]
//! manage_scope = "manage_competitions"
//! ```

pub mod ownership;
pub mod resolver;
pub mod scope;
pub mod types;
pub mod visibility;

pub use ownership::{OwnershipOracle, RoleOwnership};
pub use resolver::{AccessDecision, AccessDecisionEngine};
pub use scope::has_scope;
pub use types::{
    GlobalRole, MANAGE_COMPETITIONS_SCOPE, Principal, Principals, ScopeSet, SessionUser,
    TokenUser, UserAccount,
};
pub use visibility::is_disclosable;
