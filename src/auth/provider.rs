//! Principal resolution
//!
//! Turns the credentials presented on a request into the principals the
//! access decision engine reasons about.

use crate::access_control::Principals;
use crate::util::SecretString;

/// Credentials extracted from a request, before any lookup
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Session id from the `session` cookie or `X-Session-Id` header
    pub session_id: Option<SecretString>,
    /// OAuth access token from `Authorization: Bearer`
    pub bearer_token: Option<SecretString>,
    /// `X-CSRF-Token` header, checked for session callers on unsafe methods
    pub csrf_token: Option<String>,
}

impl RequestContext {
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(SecretString::new(session_id));
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(SecretString::new(token));
        self
    }

    pub fn with_csrf(mut self, csrf_token: impl Into<String>) -> Self {
        self.csrf_token = Some(csrf_token.into());
        self
    }
}

/// Resolves request credentials into principals
///
/// Implementations never fail: unknown or missing credentials simply leave
/// the corresponding slot empty.
pub trait PrincipalResolver: Send + Sync {
    fn resolve(&self, ctx: &RequestContext) -> Principals;

    /// Whether the CSRF token on the request matches the session's
    ///
    /// Only meaningful when `ctx` carries a session that resolves.
    fn verify_csrf(&self, ctx: &RequestContext) -> bool;

    /// Get a description of the resolver (for logging)
    fn resolver_type(&self) -> &'static str;
}

/// Box type alias for principal resolvers
pub type BoxedPrincipalResolver = Box<dyn PrincipalResolver>;
