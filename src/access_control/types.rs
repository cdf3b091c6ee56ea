//! Access control types
//!
//! Core types used by the access control system.

use crate::competition::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Scope required to manage competitions through an OAuth token
pub const MANAGE_COMPETITIONS_SCOPE: &str = "manage_competitions";

/// Site-wide role carried by a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalRole {
    Admin,
    ResultsTeam,
    Board,
}

impl GlobalRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GlobalRole::Admin => "admin",
            GlobalRole::ResultsTeam => "results_team",
            GlobalRole::Board => "board",
        }
    }
}

impl fmt::Display for GlobalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    /// Ownership claims that apply regardless of per-competition relations
    pub global_roles: BTreeSet<GlobalRole>,
}

impl UserAccount {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            global_roles: BTreeSet::new(),
        }
    }

    pub fn with_role(mut self, role: GlobalRole) -> Self {
        self.global_roles.insert(role);
        self
    }

    pub fn has_any_role(&self, roles: &BTreeSet<GlobalRole>) -> bool {
        !self.global_roles.is_disjoint(roles)
    }
}

/// Set of scopes granted to an OAuth token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// User authenticated by an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user: UserAccount,
}

/// User authenticated by an OAuth access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUser {
    pub user: UserAccount,
    pub scopes: ScopeSet,
}

/// An authenticated actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Session(SessionUser),
    Token(TokenUser),
}

impl Principal {
    pub fn session(user: UserAccount) -> Self {
        Principal::Session(SessionUser { user })
    }

    pub fn token<S: Into<String>>(user: UserAccount, scopes: impl IntoIterator<Item = S>) -> Self {
        Principal::Token(TokenUser {
            user,
            scopes: scopes.into_iter().collect(),
        })
    }

    pub fn user(&self) -> &UserAccount {
        match self {
            Principal::Session(s) => &s.user,
            Principal::Token(t) => &t.user,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Principal::Session(_) => "session",
            Principal::Token(_) => "token",
        }
    }
}

/// The principals attached to one request
///
/// A request may carry a session principal, a token principal, both or
/// neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principals {
    pub session: Option<SessionUser>,
    pub token: Option<TokenUser>,
}

impl Principals {
    /// No principal at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Place a principal into its slot, replacing any previous one of the same kind
    pub fn with(mut self, principal: Principal) -> Self {
        self.insert(principal);
        self
    }

    pub fn insert(&mut self, principal: Principal) {
        match principal {
            Principal::Session(s) => self.session = Some(s),
            Principal::Token(t) => self.token = Some(t),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.session.is_none() && self.token.is_none()
    }

    /// The user a "managed by me" query is evaluated for
    ///
    /// The token user wins when both are present.
    pub fn acting_user(&self) -> Option<&UserAccount> {
        self.token
            .as_ref()
            .map(|t| &t.user)
            .or_else(|| self.session.as_ref().map(|s| &s.user))
    }

    /// User ids for logging, `None` slots omitted
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(s) = &self.session {
            parts.push(format!("session:{}", s.user.id));
        }
        if let Some(t) = &self.token {
            parts.push(format!("token:{}", t.user.id));
        }
        if parts.is_empty() {
            "anonymous".to_string()
        } else {
            parts.join(",")
        }
    }
}

impl FromIterator<Principal> for Principals {
    fn from_iter<I: IntoIterator<Item = Principal>>(iter: I) -> Self {
        let mut principals = Self::anonymous();
        for p in iter {
            principals.insert(p);
        }
        principals
    }
}
