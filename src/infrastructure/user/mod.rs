//! User infrastructure implementations

mod postgres_repository;
mod resolver;
mod storage_repository;

pub use postgres_repository::PostgresUserRepository;
pub use resolver::IdentityResolver;
pub use storage_repository::StorageUserRepository;
