//! Team domain - teams, memberships and the member policy

mod entity;
mod membership;
mod policy;
mod repository;
mod validation;

pub use entity::{Team, TeamId};
pub use membership::{MembershipKey, TeamMembership};
pub use policy::{NonMemberMode, PolicyViolation, TeamMemberPolicy, TeamMemberRequirements};
pub use repository::{TeamMembershipRepository, TeamRepository};
pub use validation::{validate_team_id, validate_team_name, TeamValidationError};

#[cfg(test)]
pub use repository::{MockTeamMembershipRepository, MockTeamRepository};
