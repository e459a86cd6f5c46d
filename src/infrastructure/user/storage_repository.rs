//! Storage-backed user repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::user::{ExternalId, User, UserId, UserRepository};
use crate::domain::DomainError;

/// User repository over keyed storage
///
/// Users are keyed by external ID, so the storage's duplicate-key check is
/// the unique index on `external_id`.
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn find_by_external_id(&self, id: &ExternalId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, external_id: &ExternalId) -> Result<User, DomainError> {
        let user = User::provision(UserId::generate(), external_id.clone());

        self.storage.create(user).await.map_err(|e| match e {
            DomainError::UniquenessViolation { .. } => DomainError::uniqueness_violation(
                format!("User with external ID '{}' already exists", external_id),
            ),
            other => other,
        })
    }
}
