//! Team and membership repository traits

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use super::membership::TeamMembership;
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read access to teams
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;
}

/// Read access to team memberships
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamMembershipRepository: Send + Sync {
    /// Get the membership row for a (user, team) pair
    async fn find(
        &self,
        user_id: &UserId,
        team_id: &TeamId,
    ) -> Result<Option<TeamMembership>, DomainError>;
}
