//! Scope checks for token principals
//!
//! Scopes only ever restrict token callers. Session callers carry no scopes
//! and are never asked for one.

use crate::access_control::types::TokenUser;

/// Check whether the token principal, if any, was granted `scope`
///
/// Returns `false` when there is no token principal.
pub fn has_scope(token: Option<&TokenUser>, scope: &str) -> bool {
    token.is_some_and(|t| t.scopes.contains(scope))
}
