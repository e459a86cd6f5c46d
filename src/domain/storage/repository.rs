//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic keyed storage for entities the guard only reads
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Creates a new entity, fails with a uniqueness violation if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Inserts or replaces an entity
    async fn save(&self, entity: E) -> Result<E, DomainError>;

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError>;
}
