//! Migrate command - applies PostgreSQL migrations

use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{run_storage_migrations, PostgresMigrator};

/// Apply pending migrations to `storage.postgres_url` and exit
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    if config.storage.backend != StorageBackend::Postgres {
        info!("storage.backend is not postgres; migrating storage.postgres_url anyway");
    }

    let pool = crate::connect_postgres(&config.storage).await?;
    let applied = run_storage_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool).current_version().await?;

    info!(applied, ?version, "Migrations complete");

    Ok(())
}
