//! Team infrastructure implementations

mod postgres_repository;
mod seed;
mod storage_repository;

pub use postgres_repository::{PostgresMembershipRepository, PostgresTeamRepository};
pub use seed::{SeedData, SeedMembership, SeedSummary, SeedTeam};
pub use storage_repository::{StorageMembershipRepository, StorageTeamRepository};
