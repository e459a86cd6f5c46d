//! Successful guard outcome

use crate::domain::team::{Team, TeamMemberPolicy};
use crate::domain::user::User;

/// Everything a page needs after a granted check
#[derive(Debug, Clone)]
pub struct AuthorizationResult {
    pub team: Team,
    pub user: User,
    pub policy: TeamMemberPolicy,
}

impl AuthorizationResult {
    /// Admin flag of the resolved user
    pub fn is_admin(&self) -> bool {
        self.policy.is_admin(self.user.id())
    }

    /// Owner flag of the resolved user
    pub fn is_owner(&self) -> bool {
        self.policy.is_owner(self.user.id())
    }
}
