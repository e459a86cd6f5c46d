//! Team member policy - role predicates over a membership snapshot

use serde::Deserialize;
use thiserror::Error;

use super::membership::TeamMembership;
use crate::domain::user::UserId;

/// Outcome wanted by a caller when the actor holds no active membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonMemberMode {
    /// Report the team as missing so its existence is not leaked
    #[default]
    Conceal,
    /// Report a distinguishable permission failure
    Deny,
}

/// Role requirements checked by [`TeamMemberPolicy::assert`]
///
/// A flag that is absent or `false` places no constraint. Membership and
/// `is_active` are always required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TeamMemberRequirements {
    pub is_admin: Option<bool>,
    pub is_owner: Option<bool>,
    pub non_member: NonMemberMode,
}

impl TeamMemberRequirements {
    /// Any active member
    pub fn member() -> Self {
        Self::default()
    }

    /// Active member with the admin flag set
    pub fn admin() -> Self {
        Self {
            is_admin: Some(true),
            ..Self::default()
        }
    }

    /// Active member with the owner flag set
    pub fn owner() -> Self {
        Self {
            is_owner: Some(true),
            ..Self::default()
        }
    }

    pub fn with_non_member(mut self, mode: NonMemberMode) -> Self {
        self.non_member = mode;
        self
    }

    pub fn requires_admin(&self) -> bool {
        self.is_admin == Some(true)
    }

    pub fn requires_owner(&self) -> bool {
        self.is_owner == Some(true)
    }
}

/// Reason a membership failed an assertion
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("actor is not a member of the team")]
    NotMember,

    #[error("team membership is inactive")]
    InactiveMembership,

    #[error("team admin role required")]
    AdminRequired,

    #[error("team owner role required")]
    OwnerRequired,
}

impl PolicyViolation {
    /// True when the actor has no usable membership at all
    pub fn is_non_member(&self) -> bool {
        matches!(self, Self::NotMember | Self::InactiveMembership)
    }
}

/// Stateless role predicates over the membership snapshot of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberPolicy {
    membership: Option<TeamMembership>,
}

impl TeamMemberPolicy {
    pub fn new(membership: Option<TeamMembership>) -> Self {
        Self { membership }
    }

    pub fn membership(&self) -> Option<&TeamMembership> {
        self.membership.as_ref()
    }

    fn membership_for(&self, user_id: &UserId) -> Option<&TeamMembership> {
        self.membership
            .as_ref()
            .filter(|membership| membership.user_id() == user_id)
    }

    pub fn is_active(&self, user_id: &UserId) -> bool {
        self.membership_for(user_id)
            .is_some_and(TeamMembership::is_active)
    }

    pub fn is_admin(&self, user_id: &UserId) -> bool {
        self.membership_for(user_id)
            .is_some_and(TeamMembership::is_admin)
    }

    pub fn is_owner(&self, user_id: &UserId) -> bool {
        self.membership_for(user_id)
            .is_some_and(TeamMembership::is_owner)
    }

    /// Check the snapshot against caller requirements
    pub fn assert(&self, requirements: &TeamMemberRequirements) -> Result<(), PolicyViolation> {
        let membership = self.membership.as_ref().ok_or(PolicyViolation::NotMember)?;

        if !membership.is_active() {
            return Err(PolicyViolation::InactiveMembership);
        }

        if requirements.requires_admin() && !membership.is_admin() {
            return Err(PolicyViolation::AdminRequired);
        }

        if requirements.requires_owner() && !membership.is_owner() {
            return Err(PolicyViolation::OwnerRequired);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::TeamId;

    fn membership(user_id: &UserId) -> TeamMembership {
        TeamMembership::new(user_id.clone(), TeamId::new("core").unwrap())
    }

    #[test]
    fn test_predicates_false_without_membership() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(None);

        assert!(!policy.is_active(&user_id));
        assert!(!policy.is_admin(&user_id));
        assert!(!policy.is_owner(&user_id));
    }

    #[test]
    fn test_predicates_false_for_other_user() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(Some(
            membership(&user_id).with_admin(true).with_owner(true),
        ));

        let stranger = UserId::generate();
        assert!(!policy.is_active(&stranger));
        assert!(!policy.is_admin(&stranger));
        assert!(!policy.is_owner(&stranger));

        assert!(policy.is_active(&user_id));
        assert!(policy.is_admin(&user_id));
        assert!(policy.is_owner(&user_id));
    }

    #[test]
    fn test_assert_without_membership() {
        let policy = TeamMemberPolicy::new(None);

        assert_eq!(
            policy.assert(&TeamMemberRequirements::member()),
            Err(PolicyViolation::NotMember)
        );
    }

    #[test]
    fn test_assert_inactive_membership() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(Some(membership(&user_id).with_active(false)));

        assert_eq!(
            policy.assert(&TeamMemberRequirements::member()),
            Err(PolicyViolation::InactiveMembership)
        );
    }

    #[test]
    fn test_inactive_admin_still_fails() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(Some(
            membership(&user_id).with_active(false).with_admin(true),
        ));

        assert_eq!(
            policy.assert(&TeamMemberRequirements::admin()),
            Err(PolicyViolation::InactiveMembership)
        );
    }

    #[test]
    fn test_plain_member_passes_empty_requirements() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(Some(membership(&user_id)));

        assert_eq!(policy.assert(&TeamMemberRequirements::member()), Ok(()));
    }

    #[test]
    fn test_plain_member_fails_admin_requirement() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(Some(membership(&user_id)));

        assert_eq!(
            policy.assert(&TeamMemberRequirements::admin()),
            Err(PolicyViolation::AdminRequired)
        );
    }

    #[test]
    fn test_false_requirement_is_no_constraint() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(Some(membership(&user_id).with_admin(true)));
        let requirements = TeamMemberRequirements {
            is_admin: Some(false),
            is_owner: Some(false),
            ..TeamMemberRequirements::default()
        };

        assert_eq!(policy.assert(&requirements), Ok(()));
    }

    #[test]
    fn test_owner_without_admin_flag_fails_admin_requirement() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(Some(membership(&user_id).with_owner(true)));

        assert_eq!(policy.assert(&TeamMemberRequirements::owner()), Ok(()));
        assert_eq!(
            policy.assert(&TeamMemberRequirements::admin()),
            Err(PolicyViolation::AdminRequired)
        );
    }

    #[test]
    fn test_admin_without_owner_flag_fails_owner_requirement() {
        let user_id = UserId::generate();
        let policy = TeamMemberPolicy::new(Some(membership(&user_id).with_admin(true)));

        assert_eq!(
            policy.assert(&TeamMemberRequirements::owner()),
            Err(PolicyViolation::OwnerRequired)
        );
    }

    #[test]
    fn test_both_requirements_must_hold() {
        let user_id = UserId::generate();
        let requirements = TeamMemberRequirements {
            is_admin: Some(true),
            is_owner: Some(true),
            ..TeamMemberRequirements::default()
        };

        let both = TeamMemberPolicy::new(Some(
            membership(&user_id).with_admin(true).with_owner(true),
        ));
        assert_eq!(both.assert(&requirements), Ok(()));

        let admin_only = TeamMemberPolicy::new(Some(membership(&user_id).with_admin(true)));
        assert_eq!(
            admin_only.assert(&requirements),
            Err(PolicyViolation::OwnerRequired)
        );
    }

    #[test]
    fn test_requirements_deserialize_with_defaults() {
        let requirements: TeamMemberRequirements =
            serde_json::from_str(r#"{"is_admin": true}"#).unwrap();

        assert!(requirements.requires_admin());
        assert!(!requirements.requires_owner());
        assert_eq!(requirements.non_member, NonMemberMode::Conceal);
    }

    #[test]
    fn test_non_member_violations() {
        assert!(PolicyViolation::NotMember.is_non_member());
        assert!(PolicyViolation::InactiveMembership.is_non_member());
        assert!(!PolicyViolation::AdminRequired.is_non_member());
    }
}
