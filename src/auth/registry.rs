//! Credential registry
//!
//! A [`PrincipalResolver`] backed by the users, sessions and tokens declared
//! in configuration. Session establishment and token issuance happen
//! elsewhere; this registry only recognizes credentials that already exist.

use crate::access_control::{Principal, Principals, ScopeSet, TokenUser, UserAccount};
use crate::auth::provider::{PrincipalResolver, RequestContext};
use crate::competition::UserId;
use crate::config::AuthConfig;
use crate::util::SecretString;
use std::collections::HashMap;
use tracing::trace;

struct SessionEntry {
    id: SecretString,
    user_id: UserId,
    csrf_token: SecretString,
}

struct TokenEntry {
    token: SecretString,
    user_id: UserId,
    scopes: ScopeSet,
}

/// Static registry of known credentials
pub struct CredentialRegistry {
    users: HashMap<UserId, UserAccount>,
    sessions: Vec<SessionEntry>,
    tokens: Vec<TokenEntry>,
}

impl CredentialRegistry {
    /// Build the registry from validated configuration
    pub fn from_config(config: &AuthConfig) -> Self {
        let users = config
            .users
            .iter()
            .map(|u| {
                let account = u
                    .roles
                    .iter()
                    .fold(UserAccount::new(u.id, u.name.clone()), |acc, role| {
                        acc.with_role(*role)
                    });
                (u.id, account)
            })
            .collect();

        let sessions = config
            .sessions
            .iter()
            .map(|s| SessionEntry {
                id: s.id.clone(),
                user_id: s.user_id,
                csrf_token: s.csrf_token.clone(),
            })
            .collect();

        let tokens = config
            .tokens
            .iter()
            .map(|t| TokenEntry {
                token: t.token.clone(),
                user_id: t.user_id,
                scopes: t.scopes.iter().cloned().collect(),
            })
            .collect();

        Self {
            users,
            sessions,
            tokens,
        }
    }

    /// Look up a user account by id
    pub fn user(&self, id: UserId) -> Option<&UserAccount> {
        self.users.get(&id)
    }

    fn find_session(&self, session_id: &SecretString) -> Option<&SessionEntry> {
        self.sessions
            .iter()
            .find(|s| s.id.matches(session_id.expose_secret()))
    }

    fn find_token(&self, token: &SecretString) -> Option<&TokenEntry> {
        self.tokens
            .iter()
            .find(|t| t.token.matches(token.expose_secret()))
    }
}

impl PrincipalResolver for CredentialRegistry {
    fn resolve(&self, ctx: &RequestContext) -> Principals {
        let mut principals = Principals::anonymous();

        if let Some(session_id) = &ctx.session_id {
            match self
                .find_session(session_id)
                .and_then(|s| self.users.get(&s.user_id))
            {
                Some(user) => principals.insert(Principal::session(user.clone())),
                None => trace!("Unknown session id, ignoring"),
            }
        }

        if let Some(token) = &ctx.bearer_token {
            match self
                .find_token(token)
                .and_then(|t| self.users.get(&t.user_id).map(|u| (u, &t.scopes)))
            {
                Some((user, scopes)) => principals.insert(Principal::Token(TokenUser {
                    user: user.clone(),
                    scopes: scopes.clone(),
                })),
                None => trace!("Unknown bearer token, ignoring"),
            }
        }

        principals
    }

    fn verify_csrf(&self, ctx: &RequestContext) -> bool {
        let (Some(session_id), Some(presented)) = (&ctx.session_id, &ctx.csrf_token) else {
            return false;
        };
        self.find_session(session_id)
            .is_some_and(|s| s.csrf_token.matches(presented))
    }

    fn resolver_type(&self) -> &'static str {
        "Configured credentials"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_control::GlobalRole;
    use crate::config::{SessionConfig, TokenConfig, UserConfig};

    fn registry() -> CredentialRegistry {
        CredentialRegistry::from_config(&AuthConfig {
            users: vec![
                UserConfig {
                    id: UserId(1),
                    name: "Delegate".into(),
                    roles: vec![],
                },
                UserConfig {
                    id: UserId(2),
                    name: "Admin".into(),
                    roles: vec![GlobalRole::Admin],
                },
            ],
            sessions: vec![SessionConfig {
                id: SecretString::new("sess-1"),
                user_id: UserId(1),
                csrf_token: SecretString::new("csrf-1"),
            }],
            tokens: vec![TokenConfig {
                token: SecretString::new("tok-2"),
                user_id: UserId(2),
                scopes: vec!["public".into(), "manage_competitions".into()],
            }],
        })
    }

    #[test]
    fn test_resolve_nothing() {
        assert!(registry().resolve(&RequestContext::default()).is_anonymous());
    }

    #[test]
    fn test_resolve_session() {
        let principals = registry().resolve(&RequestContext::default().with_session("sess-1"));
        assert_eq!(principals.session.unwrap().user.id, UserId(1));
        assert!(principals.token.is_none());
    }

    #[test]
    fn test_resolve_token_with_scopes() {
        let principals = registry().resolve(&RequestContext::default().with_bearer("tok-2"));
        let token = principals.token.unwrap();
        assert_eq!(token.user.id, UserId(2));
        assert!(token.scopes.contains("manage_competitions"));
        assert!(token.user.global_roles.contains(&GlobalRole::Admin));
    }

    #[test]
    fn test_resolve_both() {
        let ctx = RequestContext::default()
            .with_session("sess-1")
            .with_bearer("tok-2");
        let principals = registry().resolve(&ctx);
        assert!(principals.session.is_some());
        assert!(principals.token.is_some());
    }

    #[test]
    fn test_unknown_credentials_are_absent() {
        let ctx = RequestContext::default()
            .with_session("nope")
            .with_bearer("nope");
        assert!(registry().resolve(&ctx).is_anonymous());
    }

    #[test]
    fn test_verify_csrf() {
        let reg = registry();
        let ok = RequestContext::default().with_session("sess-1").with_csrf("csrf-1");
        let bad = RequestContext::default().with_session("sess-1").with_csrf("csrf-x");
        let missing = RequestContext::default().with_session("sess-1");

        assert!(reg.verify_csrf(&ok));
        assert!(!reg.verify_csrf(&bad));
        assert!(!reg.verify_csrf(&missing));
    }

    #[test]
    fn test_user_lookup() {
        assert_eq!(registry().user(UserId(2)).unwrap().name, "Admin");
        assert!(registry().user(UserId(3)).is_none());
    }
}
