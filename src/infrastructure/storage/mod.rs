//! Storage infrastructure - Storage implementations

mod in_memory;
pub mod migrations;
mod postgres;

pub use in_memory::InMemoryStorage;
pub use migrations::{run_storage_migrations, Migration, PostgresMigrator};
pub use postgres::{connect, map_sqlx_error, PostgresConfig};
