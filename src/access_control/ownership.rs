//! Ownership oracle
//!
//! Answers "does this user manage this competition". The decision engine
//! only sees the [`OwnershipOracle`] trait, so any predicate can be plugged
//! in; [`RoleOwnership`] is the configured, role-based implementation.

use crate::access_control::types::{GlobalRole, UserAccount};
use crate::competition::{Competition, OwnerRole};
use crate::config::AccessControlConfig;
use std::collections::BTreeSet;

/// Predicate deciding whether a user owns a competition
pub trait OwnershipOracle: Send + Sync {
    fn owns(&self, user: &UserAccount, competition: &Competition) -> bool;
}

impl<F> OwnershipOracle for F
where
    F: Fn(&UserAccount, &Competition) -> bool + Send + Sync,
{
    fn owns(&self, user: &UserAccount, competition: &Competition) -> bool {
        self(user, competition)
    }
}

/// Role-based ownership
///
/// A user owns a competition when they hold one of `managing_roles` on it,
/// or when they carry one of `global_manager_roles` site-wide.
#[derive(Debug, Clone)]
pub struct RoleOwnership {
    managing_roles: BTreeSet<OwnerRole>,
    global_manager_roles: BTreeSet<GlobalRole>,
}

impl RoleOwnership {
    pub fn new(
        managing_roles: impl IntoIterator<Item = OwnerRole>,
        global_manager_roles: impl IntoIterator<Item = GlobalRole>,
    ) -> Self {
        Self {
            managing_roles: managing_roles.into_iter().collect(),
            global_manager_roles: global_manager_roles.into_iter().collect(),
        }
    }

    pub fn from_config(config: &AccessControlConfig) -> Self {
        Self::new(
            config.managing_roles.iter().copied(),
            config.global_manager_roles.iter().copied(),
        )
    }
}

impl Default for RoleOwnership {
    fn default() -> Self {
        Self::from_config(&AccessControlConfig::default())
    }
}

impl OwnershipOracle for RoleOwnership {
    fn owns(&self, user: &UserAccount, competition: &Competition) -> bool {
        if user.has_any_role(&self.global_manager_roles) {
            return true;
        }
        competition
            .roles_of(user.id)
            .any(|role| self.managing_roles.contains(&role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competition::UserId;

    fn comp() -> Competition {
        Competition::new("Open2024", "Open 2024")
            .with_owner(UserId(1), OwnerRole::Delegate)
            .with_owner(UserId(2), OwnerRole::Organizer)
            .with_owner(UserId(3), OwnerRole::TraineeDelegate)
    }

    #[test]
    fn test_default_roles() {
        let oracle = RoleOwnership::default();
        let c = comp();
        assert!(oracle.owns(&UserAccount::new(UserId(1), "d"), &c));
        assert!(oracle.owns(&UserAccount::new(UserId(2), "o"), &c));
        assert!(oracle.owns(&UserAccount::new(UserId(3), "t"), &c));
        assert!(!oracle.owns(&UserAccount::new(UserId(4), "x"), &c));
    }

    #[test]
    fn test_restricted_roles() {
        let oracle = RoleOwnership::new([OwnerRole::Delegate], []);
        let c = comp();
        assert!(oracle.owns(&UserAccount::new(UserId(1), "d"), &c));
        assert!(!oracle.owns(&UserAccount::new(UserId(2), "o"), &c));
    }

    #[test]
    fn test_global_manager_owns_everything() {
        let oracle = RoleOwnership::default();
        let admin = UserAccount::new(UserId(99), "admin").with_role(GlobalRole::Admin);
        assert!(oracle.owns(&admin, &comp()));

        let board = UserAccount::new(UserId(98), "board").with_role(GlobalRole::Board);
        assert!(!oracle.owns(&board, &comp()));
    }

    #[test]
    fn test_closure_oracle() {
        let only_42 = |user: &UserAccount, _: &Competition| user.id == UserId(42);
        assert!(only_42.owns(&UserAccount::new(UserId(42), "x"), &comp()));
        assert!(!only_42.owns(&UserAccount::new(UserId(1), "d"), &comp()));
    }
}
