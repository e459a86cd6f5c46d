//! Auth guard - team-scoped authorization checks

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::auth::{AuthorizationError, AuthorizationResult, ForbiddenReason};
use crate::domain::team::{
    NonMemberMode, TeamId, TeamMemberPolicy, TeamMemberRequirements, TeamMembershipRepository,
    TeamRepository,
};
use crate::domain::user::ExternalId;
use crate::infrastructure::observability::record_authorization;
use crate::infrastructure::user::IdentityResolver;

/// Grants or denies an actor access to a team
///
/// Every call is a single stateless pass: resolve the actor, load the team,
/// load the membership, assert the requirements.
pub struct AuthGuard {
    resolver: Arc<IdentityResolver>,
    teams: Arc<dyn TeamRepository>,
    memberships: Arc<dyn TeamMembershipRepository>,
}

impl AuthGuard {
    pub fn new(
        resolver: Arc<IdentityResolver>,
        teams: Arc<dyn TeamRepository>,
        memberships: Arc<dyn TeamMembershipRepository>,
    ) -> Self {
        Self {
            resolver,
            teams,
            memberships,
        }
    }

    /// Authorize `actor_external_id` against `team_id`
    ///
    /// `None` means the request carried no authenticated actor.
    #[instrument(skip(self, actor_external_id, requirements), fields(team_id = %team_id))]
    pub async fn authorise_by_team_member(
        &self,
        actor_external_id: Option<&str>,
        team_id: &str,
        requirements: &TeamMemberRequirements,
    ) -> Result<AuthorizationResult, AuthorizationError> {
        let result = self.evaluate(actor_external_id, team_id, requirements).await;

        match &result {
            Ok(_) => record_authorization("granted"),
            Err(e) => {
                if let AuthorizationError::Infrastructure(source) = e {
                    warn!(error = %source, "Authorization aborted by store failure");
                }
                record_authorization(e.kind());
            }
        }

        result
    }

    async fn evaluate(
        &self,
        actor_external_id: Option<&str>,
        team_id: &str,
        requirements: &TeamMemberRequirements,
    ) -> Result<AuthorizationResult, AuthorizationError> {
        let Some(actor) = actor_external_id else {
            debug!("No actor on request");
            return Err(AuthorizationError::Unauthenticated);
        };

        let external_id = ExternalId::new(actor).map_err(|e| {
            debug!(error = %e, "Unusable actor identifier");
            AuthorizationError::Unauthenticated
        })?;

        let user = self.resolver.resolve(&external_id).await?;

        let team = match TeamId::new(team_id) {
            Ok(id) => self.teams.find_by_id(&id).await?,
            Err(e) => {
                debug!(error = %e, "Malformed team ID");
                None
            }
        }
        .ok_or_else(|| AuthorizationError::not_found(team_id))?;

        if !user.is_active() {
            debug!(user_id = %user.id(), "User account is deactivated");
            return Err(AuthorizationError::forbidden(
                team_id,
                ForbiddenReason::InactiveUser,
            ));
        }

        let membership = self.memberships.find(user.id(), team.id()).await?;
        let policy = TeamMemberPolicy::new(membership);

        if let Err(violation) = policy.assert(requirements) {
            debug!(user_id = %user.id(), %violation, "Team membership requirements not met");

            let conceal =
                violation.is_non_member() && requirements.non_member == NonMemberMode::Conceal;

            return Err(if conceal {
                AuthorizationError::not_found(team_id)
            } else {
                AuthorizationError::forbidden(team_id, ForbiddenReason::Policy(violation))
            });
        }

        Ok(AuthorizationResult { team, user, policy })
    }
}
