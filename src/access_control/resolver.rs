//! Access decision engine
//!
//! Resolves whether the principals on a request may manage a competition:
//!
//! 1. A session principal manages a competition when it owns it
//! 2. A token principal manages a competition when it owns it AND its token
//!    carries the manage scope
//! 3. The request is allowed when either principal is allowed
//!
//! Disclosure of hidden competitions is decided by the same manage verdict,
//! so there is exactly one ownership test.

use crate::access_control::ownership::OwnershipOracle;
use crate::access_control::scope::has_scope;
use crate::access_control::types::{MANAGE_COMPETITIONS_SCOPE, Principals, UserAccount};
use crate::access_control::visibility::is_disclosable;
use crate::competition::Competition;
use crate::error::{AccessError, AccessResult};
use std::sync::Arc;
use tracing::{debug, trace};

/// Result of a manage check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access is allowed
    Allowed,
    /// Access is denied with a reason
    Denied(String),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessDecision::Denied(_))
    }
}

/// Access decision engine
///
/// Stateless apart from the injected ownership oracle; safe to share across
/// request handlers.
#[derive(Clone)]
pub struct AccessDecisionEngine {
    ownership: Arc<dyn OwnershipOracle>,
    manage_scope: String,
}

impl AccessDecisionEngine {
    /// Create an engine requiring the default `manage_competitions` scope
    pub fn new(ownership: Arc<dyn OwnershipOracle>) -> Self {
        Self::with_manage_scope(ownership, MANAGE_COMPETITIONS_SCOPE)
    }

    pub fn with_manage_scope(
        ownership: Arc<dyn OwnershipOracle>,
        manage_scope: impl Into<String>,
    ) -> Self {
        Self {
            ownership,
            manage_scope: manage_scope.into(),
        }
    }

    /// Scope a token principal needs to manage competitions
    pub fn manage_scope(&self) -> &str {
        &self.manage_scope
    }

    /// Ask the ownership oracle directly, without any scope gate
    pub fn owns(&self, user: &UserAccount, competition: &Competition) -> bool {
        self.ownership.owns(user, competition)
    }

    /// Evaluate the manage rule, keeping the reason for denials
    pub fn check_manage(&self, competition: &Competition, principals: &Principals) -> AccessDecision {
        if principals.is_anonymous() {
            return AccessDecision::Denied("no authenticated principal".to_string());
        }

        if let Some(session) = &principals.session
            && self.owns(&session.user, competition)
        {
            trace!(user = %session.user.id, "Session principal owns competition");
            return AccessDecision::Allowed;
        }

        let mut reasons = Vec::new();
        if let Some(session) = &principals.session {
            reasons.push(format!("session user {} does not own competition", session.user.id));
        }

        if let Some(token) = &principals.token {
            let owns = self.owns(&token.user, competition);
            let scoped = has_scope(Some(token), &self.manage_scope);
            if owns && scoped {
                trace!(user = %token.user.id, "Token principal owns competition and has scope");
                return AccessDecision::Allowed;
            }
            if !owns {
                reasons.push(format!("token user {} does not own competition", token.user.id));
            } else {
                reasons.push(format!(
                    "token for user {} lacks scope '{}'",
                    token.user.id, self.manage_scope
                ));
            }
        }

        AccessDecision::Denied(reasons.join("; "))
    }

    /// Whether any principal on the request may manage the competition
    pub fn can_manage(&self, competition: &Competition, principals: &Principals) -> bool {
        let decision = self.check_manage(competition, principals);
        debug!(
            competition = %competition.id,
            principals = %principals.describe(),
            decision = ?decision,
            "Checked manage access"
        );
        decision.is_allowed()
    }

    /// Fail unless at least one principal is present
    pub fn require_authenticated(&self, principals: &Principals) -> AccessResult<()> {
        if principals.is_anonymous() {
            return Err(AccessError::AuthenticationRequired);
        }
        Ok(())
    }

    /// Fail unless the token principal, if present, carries `scope`
    ///
    /// Session-only callers always pass: scopes apply to token callers only.
    pub fn require_scope(&self, scope: &str, principals: &Principals) -> AccessResult<()> {
        self.require_authenticated(principals)?;
        if let Some(token) = &principals.token
            && !has_scope(Some(token), scope)
        {
            debug!(user = %token.user.id, scope, "Token is missing required scope");
            return Err(AccessError::MissingScope(scope.to_string()));
        }
        Ok(())
    }

    /// Fail unless some principal may manage the competition
    pub fn require_manage(
        &self,
        competition: &Competition,
        principals: &Principals,
    ) -> AccessResult<()> {
        self.require_authenticated(principals)?;
        if !self.can_manage(competition, principals) {
            return Err(AccessError::NotPermitted);
        }
        Ok(())
    }

    /// Whether the competition may be shown to these principals
    pub fn is_visible_to(&self, competition: &Competition, principals: &Principals) -> bool {
        is_disclosable(competition, self.can_manage(competition, principals))
    }

    /// Return the competition if it exists and may be disclosed
    ///
    /// An absent competition and a hidden one the caller cannot manage yield
    /// the same `NotFound(id)`, built from the requested id alone.
    pub fn resolve_visible(
        &self,
        requested_id: &str,
        competition: Option<Competition>,
        principals: &Principals,
    ) -> AccessResult<Competition> {
        match competition {
            Some(c) if self.is_visible_to(&c, principals) => Ok(c),
            _ => Err(AccessError::NotFound(requested_id.to_string())),
        }
    }

    /// Resolve the user a "managed by me" listing is filtered by
    ///
    /// Requires the manage scope for token callers.
    pub fn managed_by_filter<'a>(
        &self,
        principals: &'a Principals,
    ) -> AccessResult<&'a UserAccount> {
        self.require_scope(&self.manage_scope, principals)?;
        principals
            .acting_user()
            .ok_or(AccessError::AuthenticationRequired)
    }
}

impl std::fmt::Debug for AccessDecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessDecisionEngine")
            .field("manage_scope", &self.manage_scope)
            .finish_non_exhaustive()
    }
}
