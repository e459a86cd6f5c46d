//! User repository trait

use async_trait::async_trait;

use super::entity::{ExternalId, User};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for internal user records
///
/// Implementations must enforce uniqueness of `external_id` at the store
/// level and report a duplicate insert as
/// [`DomainError::UniquenessViolation`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the user provisioned for an identity-provider actor
    async fn find_by_external_id(&self, id: &ExternalId) -> Result<Option<User>, DomainError>;

    /// Create a new active user; the store assigns the internal id
    async fn create(&self, external_id: &ExternalId) -> Result<User, DomainError>;
}
