//! Domain layer - entities, repository contracts and the member policy

pub mod auth;
pub mod error;
pub mod storage;
pub mod team;
pub mod user;

pub use auth::{AuthorizationError, AuthorizationResult, ForbiddenReason};
pub use error::DomainError;
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{
    NonMemberMode, PolicyViolation, Team, TeamId, TeamMemberPolicy, TeamMemberRequirements,
    TeamMembership, TeamMembershipRepository, TeamRepository,
};
pub use user::{ExternalId, User, UserId, UserRepository};
