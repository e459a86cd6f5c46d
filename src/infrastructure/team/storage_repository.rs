//! Storage-backed team and membership repositories

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::team::{
    MembershipKey, Team, TeamId, TeamMembership, TeamMembershipRepository, TeamRepository,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(id).await
    }
}

/// Storage-backed implementation of TeamMembershipRepository
#[derive(Debug)]
pub struct StorageMembershipRepository {
    storage: Arc<dyn Storage<TeamMembership>>,
}

impl StorageMembershipRepository {
    pub fn new(storage: Arc<dyn Storage<TeamMembership>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamMembershipRepository for StorageMembershipRepository {
    async fn find(
        &self,
        user_id: &UserId,
        team_id: &TeamId,
    ) -> Result<Option<TeamMembership>, DomainError> {
        self.storage.get(&MembershipKey::new(user_id, team_id)).await
    }
}
