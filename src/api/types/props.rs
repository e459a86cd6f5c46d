//! Page props returned after a granted check

use serde::{Deserialize, Serialize};

use crate::domain::AuthorizationResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPageProps {
    pub team: TeamProps,
    pub user: UserProps,
    pub membership: MembershipProps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProps {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Only the internal id; the external id stays server side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProps {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProps {
    pub is_admin: bool,
    pub is_owner: bool,
}

impl From<AuthorizationResult> for TeamPageProps {
    fn from(result: AuthorizationResult) -> Self {
        let membership = MembershipProps {
            is_admin: result.is_admin(),
            is_owner: result.is_owner(),
        };

        Self {
            team: TeamProps {
                id: result.team.id().to_string(),
                name: result.team.name().to_string(),
                description: result.team.description().map(str::to_string),
            },
            user: UserProps {
                id: result.user.id().to_string(),
            },
            membership,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::{Team, TeamId, TeamMemberPolicy, TeamMembership};
    use crate::domain::user::{ExternalId, User, UserId};

    #[test]
    fn test_props_from_result() {
        let team = Team::new(TeamId::new("core").unwrap(), "Core").with_description("Core team");
        let user = User::provision(UserId::generate(), ExternalId::new("ext-1").unwrap());
        let membership =
            TeamMembership::new(user.id().clone(), team.id().clone()).with_admin(true);
        let user_id = user.id().to_string();

        let props = TeamPageProps::from(AuthorizationResult {
            team,
            user,
            policy: TeamMemberPolicy::new(Some(membership)),
        });

        assert_eq!(props.team.id, "core");
        assert_eq!(props.team.description.as_deref(), Some("Core team"));
        assert_eq!(props.user.id, user_id);
        assert!(props.membership.is_admin);
        assert!(!props.membership.is_owner);
    }

    #[test]
    fn test_props_serialize_without_external_id() {
        let team = Team::new(TeamId::new("core").unwrap(), "Core");
        let user = User::provision(UserId::generate(), ExternalId::new("ext-secret").unwrap());
        let membership = TeamMembership::new(user.id().clone(), team.id().clone());

        let props = TeamPageProps::from(AuthorizationResult {
            team,
            user,
            policy: TeamMemberPolicy::new(Some(membership)),
        });
        let json = serde_json::to_string(&props).unwrap();

        assert!(!json.contains("ext-secret"));
        assert!(json.contains("\"description\":null"));
    }
}
