//! Team membership rows

use serde::{Deserialize, Serialize};

use super::entity::TeamId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Composite storage key for a membership: `"{user_id}:{team_id}"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MembershipKey(String);

impl MembershipKey {
    pub fn new(user_id: &UserId, team_id: &TeamId) -> Self {
        Self(format!("{}:{}", user_id, team_id))
    }
}

impl StorageKey for MembershipKey {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A user's membership in a team
///
/// The three flags are stored independently. Nothing here derives `is_admin`
/// from `is_owner` or `is_active` from either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    user_id: UserId,
    team_id: TeamId,
    is_active: bool,
    is_admin: bool,
    is_owner: bool,
}

impl TeamMembership {
    /// An active plain membership
    pub fn new(user_id: UserId, team_id: TeamId) -> Self {
        Self {
            user_id,
            team_id,
            is_active: true,
            is_admin: false,
            is_owner: false,
        }
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    pub fn with_owner(mut self, is_owner: bool) -> Self {
        self.is_owner = is_owner;
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }
}

impl StorageEntity for TeamMembership {
    type Key = MembershipKey;

    fn key(&self) -> Self::Key {
        MembershipKey::new(&self.user_id, &self.team_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_membership_is_plain_active_member() {
        let membership = TeamMembership::new(UserId::generate(), TeamId::new("core").unwrap());

        assert!(membership.is_active());
        assert!(!membership.is_admin());
        assert!(!membership.is_owner());
    }

    #[test]
    fn test_owner_flag_does_not_imply_admin() {
        let membership = TeamMembership::new(UserId::generate(), TeamId::new("core").unwrap())
            .with_owner(true);

        assert!(membership.is_owner());
        assert!(!membership.is_admin());
    }

    #[test]
    fn test_membership_keys_differ_per_team() {
        let user_id = UserId::generate();
        let a = MembershipKey::new(&user_id, &TeamId::new("a").unwrap());
        let b = MembershipKey::new(&user_id, &TeamId::new("b").unwrap());

        assert_ne!(a, b);
    }
}
