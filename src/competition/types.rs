//! Competition types
//!
//! The slice of the competition model needed for authorization and event
//! synchronization.

use crate::competition::event::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric user account id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a competition is disclosed to callers who cannot manage it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub const fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// Role linking a user to a competition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerRole {
    Delegate,
    TraineeDelegate,
    Organizer,
}

impl OwnerRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OwnerRole::Delegate => "delegate",
            OwnerRole::TraineeDelegate => "trainee_delegate",
            OwnerRole::Organizer => "organizer",
        }
    }
}

impl fmt::Display for OwnerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's role on one competition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRelation {
    pub user_id: UserId,
    pub role: OwnerRole,
}

impl OwnerRelation {
    pub const fn new(user_id: UserId, role: OwnerRole) -> Self {
        Self { user_id, role }
    }
}

/// A competition and its scheduled events
#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub visibility: Visibility,
    pub owners: Vec<OwnerRelation>,
    pub events: Vec<Event>,
}

impl Competition {
    /// Create a visible competition with no owners and no events
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visibility: Visibility::Visible,
            owners: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_owner(mut self, user_id: UserId, role: OwnerRole) -> Self {
        self.owners.push(OwnerRelation::new(user_id, role));
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    /// Roles the given user holds on this competition
    pub fn roles_of(&self, user_id: UserId) -> impl Iterator<Item = OwnerRole> + '_ {
        self.owners
            .iter()
            .filter(move |rel| rel.user_id == user_id)
            .map(|rel| rel.role)
    }

    /// User ids holding the given role, in declaration order
    pub fn users_with_role(&self, role: OwnerRole) -> Vec<UserId> {
        self.owners
            .iter()
            .filter(|rel| rel.role == role)
            .map(|rel| rel.user_id)
            .collect()
    }

    /// Event type ids in stored order
    pub fn event_ids(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.event_type.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_of() {
        let comp = Competition::new("Open2024", "Open 2024")
            .with_owner(UserId(1), OwnerRole::Delegate)
            .with_owner(UserId(1), OwnerRole::Organizer)
            .with_owner(UserId(2), OwnerRole::Organizer);

        let roles: Vec<_> = comp.roles_of(UserId(1)).collect();
        assert_eq!(roles, vec![OwnerRole::Delegate, OwnerRole::Organizer]);
        assert_eq!(comp.roles_of(UserId(3)).count(), 0);
    }

    #[test]
    fn test_users_with_role() {
        let comp = Competition::new("Open2024", "Open 2024")
            .with_owner(UserId(5), OwnerRole::Organizer)
            .with_owner(UserId(1), OwnerRole::Delegate)
            .with_owner(UserId(2), OwnerRole::Organizer);

        assert_eq!(comp.users_with_role(OwnerRole::Organizer), vec![UserId(5), UserId(2)]);
        assert!(comp.users_with_role(OwnerRole::TraineeDelegate).is_empty());
    }

    #[test]
    fn test_visibility_deserialize() {
        let v: Visibility = serde_json::from_str(r#""hidden""#).unwrap();
        assert_eq!(v, Visibility::Hidden);
        assert!(!v.is_visible());
    }
}
