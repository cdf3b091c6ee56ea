//! Authentication module
//!
//! Resolves the credentials on a request (session cookie, bearer token) into
//! principals. Credentials that do not resolve are treated as absent; it is
//! up to the access decision engine to reject anonymous callers.

pub mod provider;
pub mod registry;

pub use provider::{BoxedPrincipalResolver, PrincipalResolver, RequestContext};
pub use registry::CredentialRegistry;

use crate::config::AuthConfig;

/// Create a principal resolver from configuration
pub fn create_principal_resolver(config: &AuthConfig) -> BoxedPrincipalResolver {
    Box::new(CredentialRegistry::from_config(config))
}
