//! Identity resolver - external actor to internal user

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::user::{ExternalId, User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_user_create_race, record_user_provisioned};

/// Maps identity-provider actors to internal users, provisioning on first sight
///
/// The store's unique index on `external_id` is the only concurrency control.
/// A create that loses the race is answered by a single repeated lookup.
pub struct IdentityResolver {
    repository: Arc<dyn UserRepository>,
}

impl IdentityResolver {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Return the user for `external_id`, creating it if this is its first appearance
    pub async fn resolve(&self, external_id: &ExternalId) -> Result<User, DomainError> {
        if let Some(user) = self.repository.find_by_external_id(external_id).await? {
            debug!(user_id = %user.id(), "Resolved existing user");
            return Ok(user);
        }

        match self.repository.create(external_id).await {
            Ok(user) => {
                info!(user_id = %user.id(), external_id = %external_id, "Provisioned user");
                record_user_provisioned();
                Ok(user)
            }
            Err(e) if e.is_uniqueness_violation() => {
                warn!(external_id = %external_id, "User created concurrently, retrying lookup");
                record_user_create_race();

                self.repository
                    .find_by_external_id(external_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::internal(format!(
                            "User '{}' reported as existing but could not be loaded",
                            external_id
                        ))
                    })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::domain::storage::Storage;
    use crate::domain::user::{MockUserRepository, UserId};
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::StorageUserRepository;

    fn external_id(id: &str) -> ExternalId {
        ExternalId::new(id).unwrap()
    }

    fn stored_user(id: &str) -> User {
        User::provision(UserId::generate(), external_id(id))
    }

    #[tokio::test]
    async fn test_existing_user_returned_without_create() {
        let existing = stored_user("user_1");
        let returned = existing.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_external_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_create().never();

        let resolver = IdentityResolver::new(Arc::new(repo));
        let user = resolver.resolve(&external_id("user_1")).await.unwrap();

        assert_eq!(user, existing);
    }

    #[tokio::test]
    async fn test_missing_user_is_created_active() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_external_id()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|id| id.as_str() == "new_user")
            .times(1)
            .returning(|id| Ok(User::provision(UserId::generate(), id.clone())));

        let resolver = IdentityResolver::new(Arc::new(repo));
        let user = resolver.resolve(&external_id("new_user")).await.unwrap();

        assert_eq!(user.external_id().as_str(), "new_user");
        assert!(user.is_active());
    }

    #[tokio::test]
    async fn test_create_race_retries_lookup_once() {
        let winner = stored_user("user_1");
        let returned = winner.clone();
        let mut lookups = 0;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_external_id()
            .times(2)
            .returning(move |_| {
                lookups += 1;
                if lookups == 1 {
                    Ok(None)
                } else {
                    Ok(Some(returned.clone()))
                }
            });
        repo.expect_create()
            .times(1)
            .returning(|_| Err(DomainError::uniqueness_violation("external_id taken")));

        let resolver = IdentityResolver::new(Arc::new(repo));
        let user = resolver.resolve(&external_id("user_1")).await.unwrap();

        assert_eq!(user.id(), winner.id());
    }

    #[tokio::test]
    async fn test_persistent_race_is_internal_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_external_id()
            .times(2)
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(DomainError::uniqueness_violation("external_id taken")));

        let resolver = IdentityResolver::new(Arc::new(repo));
        let err = resolver.resolve(&external_id("user_1")).await.unwrap_err();

        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates_without_create() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_external_id()
            .times(1)
            .returning(|_| Err(DomainError::storage("connection refused")));
        repo.expect_create().never();

        let resolver = IdentityResolver::new(Arc::new(repo));
        let err = resolver.resolve(&external_id("user_1")).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_create_failure_is_not_retried() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_external_id()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(DomainError::storage("disk full")));

        let resolver = IdentityResolver::new(Arc::new(repo));
        let err = resolver.resolve(&external_id("user_1")).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_sequential_resolution_is_idempotent() {
        let storage = Arc::new(InMemoryStorage::<User>::new());
        let repo = StorageUserRepository::new(storage.clone());
        let resolver = IdentityResolver::new(Arc::new(repo));

        let first = resolver.resolve(&external_id("user_1")).await.unwrap();
        let second = resolver.resolve(&external_id("user_1")).await.unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(storage.count().await.unwrap(), 1);
    }

    /// Holds every racer after its lookup until all racers have looked up,
    /// so each one misses and proceeds to create.
    struct LockstepUserRepository {
        inner: StorageUserRepository,
        barrier: Barrier,
        lookups: AtomicUsize,
        racers: usize,
    }

    #[async_trait]
    impl UserRepository for LockstepUserRepository {
        async fn find_by_external_id(&self, id: &ExternalId) -> Result<Option<User>, DomainError> {
            let found = self.inner.find_by_external_id(id).await?;

            if self.lookups.fetch_add(1, Ordering::SeqCst) < self.racers {
                self.barrier.wait().await;
            }

            Ok(found)
        }

        async fn create(&self, external_id: &ExternalId) -> Result<User, DomainError> {
            self.inner.create(external_id).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resolution_creates_one_user() {
        const RACERS: usize = 16;

        let storage = Arc::new(InMemoryStorage::<User>::new());
        let repo = LockstepUserRepository {
            inner: StorageUserRepository::new(storage.clone()),
            barrier: Barrier::new(RACERS),
            lookups: AtomicUsize::new(0),
            racers: RACERS,
        };
        let resolver = Arc::new(IdentityResolver::new(Arc::new(repo)));

        let handles: Vec<_> = (0..RACERS)
            .map(|_| {
                let resolver = resolver.clone();
                tokio::spawn(async move { resolver.resolve(&external_id("racer")).await })
            })
            .collect();

        let mut ids = HashSet::new();

        for handle in handles {
            let user = handle.await.unwrap().unwrap();
            ids.insert(user.id().clone());
        }

        assert_eq!(ids.len(), 1);
        assert_eq!(storage.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_distinct_actors_get_distinct_users() {
        let storage = Arc::new(InMemoryStorage::<User>::new());
        let resolver = IdentityResolver::new(Arc::new(StorageUserRepository::new(storage.clone())));

        let a = resolver.resolve(&external_id("user_a")).await.unwrap();
        let b = resolver.resolve(&external_id("user_b")).await.unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(storage.count().await.unwrap(), 2);
    }
}
