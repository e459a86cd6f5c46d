//! Team Guard
//!
//! Authorization guard for team-scoped resources:
//! - Lazy provisioning of users from external identity provider ids
//! - Member, admin and owner requirements checked against team memberships
//! - In-memory (optionally seeded) and PostgreSQL stores

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use tracing::{info, warn};

use api::state::AppState;
use config::{StorageBackend, StorageConfig};
use domain::team::{Team, TeamMembership};
use domain::user::User;
use infrastructure::{
    auth::AuthGuard,
    storage::{connect, run_storage_migrations, InMemoryStorage, PostgresConfig},
    team::{
        PostgresMembershipRepository, PostgresTeamRepository, SeedData,
        StorageMembershipRepository, StorageTeamRepository,
    },
    user::{IdentityResolver, PostgresUserRepository, StorageUserRepository},
};

/// Build the application state for the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.storage.backend {
        StorageBackend::Memory => create_memory_state(config).await,
        StorageBackend::Postgres => create_postgres_state(config).await,
    }
}

async fn create_memory_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let users = Arc::new(InMemoryStorage::<User>::new());
    let teams = Arc::new(InMemoryStorage::<Team>::new());
    let memberships = Arc::new(InMemoryStorage::<TeamMembership>::new());

    let resolver = Arc::new(IdentityResolver::new(Arc::new(StorageUserRepository::new(
        users,
    ))));

    if let Some(path) = &config.storage.seed_file {
        let seed = SeedData::load(path).await?;
        seed.apply(teams.as_ref(), memberships.as_ref(), &resolver)
            .await
            .with_context(|| format!("Failed to apply seed file '{}'", path))?;
    }

    info!("Using in-memory storage");

    let guard = AuthGuard::new(
        resolver,
        Arc::new(StorageTeamRepository::new(teams)),
        Arc::new(StorageMembershipRepository::new(memberships)),
    );

    Ok(AppState::new(Arc::new(guard), &config.auth)?)
}

async fn create_postgres_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = connect_postgres(&config.storage).await?;

    if config.storage.run_migrations {
        run_storage_migrations(&pool).await?;
    }

    if config.storage.seed_file.is_some() {
        warn!("storage.seed_file is ignored by the postgres backend");
    }

    info!("Using PostgreSQL storage");

    let resolver = Arc::new(IdentityResolver::new(Arc::new(PostgresUserRepository::new(
        pool.clone(),
    ))));
    let guard = AuthGuard::new(
        resolver,
        Arc::new(PostgresTeamRepository::new(pool.clone())),
        Arc::new(PostgresMembershipRepository::new(pool.clone())),
    );

    Ok(AppState::new(Arc::new(guard), &config.auth)?.with_pool(pool))
}

/// Open a pool from `storage.postgres_url`
pub async fn connect_postgres(storage: &StorageConfig) -> anyhow::Result<PgPool> {
    let url = storage
        .postgres_url
        .as_deref()
        .context("storage.postgres_url is required for the postgres backend")?;

    let pool = connect(&PostgresConfig::new(url).with_max_connections(storage.max_connections))
        .await?;

    Ok(pool)
}
