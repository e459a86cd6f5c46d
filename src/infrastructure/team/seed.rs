//! Seed data for the in-memory backend

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::storage::Storage;
use crate::domain::team::{validate_team_name, Team, TeamId, TeamMembership};
use crate::domain::user::ExternalId;
use crate::domain::DomainError;
use crate::infrastructure::user::IdentityResolver;

/// Teams and memberships declared in a TOML seed file
///
/// ```toml
/// [[teams]]
/// id = "platform"
/// name = "Platform"
///
/// [[memberships]]
/// team_id = "platform"
/// external_id = "user_2NNEqL2nrIRdJ194ndJqAHwEfxC"
/// is_admin = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub teams: Vec<SeedTeam>,
    #[serde(default)]
    pub memberships: Vec<SeedMembership>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedTeam {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedMembership {
    pub team_id: TeamId,
    pub external_id: ExternalId,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_owner: bool,
}

fn default_active() -> bool {
    true
}

/// Counts of rows written by [`SeedData::apply`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub teams: usize,
    pub memberships: usize,
}

impl SeedData {
    pub fn from_toml(content: &str) -> Result<Self, DomainError> {
        toml::from_str(content)
            .map_err(|e| DomainError::configuration(format!("Invalid seed file: {}", e)))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read seed file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Write teams, then provision each member through the resolver and store its membership
    pub async fn apply(
        &self,
        teams: &dyn Storage<Team>,
        memberships: &dyn Storage<TeamMembership>,
        resolver: &IdentityResolver,
    ) -> Result<SeedSummary, DomainError> {
        let mut summary = SeedSummary::default();

        for seed in &self.teams {
            validate_team_name(&seed.name).map_err(|e| {
                DomainError::validation(format!("Seed team '{}': {}", seed.id, e))
            })?;

            let team = Team::new(seed.id.clone(), seed.name.clone());
            let team = match &seed.description {
                Some(description) => team.with_description(description.clone()),
                None => team,
            };

            teams.save(team).await?;
            summary.teams += 1;
        }

        for seed in &self.memberships {
            if teams.get(&seed.team_id).await?.is_none() {
                return Err(DomainError::validation(format!(
                    "Seed membership references unknown team '{}'",
                    seed.team_id
                )));
            }

            let user = resolver.resolve(&seed.external_id).await?;
            let membership = TeamMembership::new(user.id().clone(), seed.team_id.clone())
                .with_active(seed.is_active)
                .with_admin(seed.is_admin)
                .with_owner(seed.is_owner);

            memberships.save(membership).await?;
            summary.memberships += 1;
        }

        info!(
            teams = summary.teams,
            memberships = summary.memberships,
            "Applied seed data"
        );

        Ok(summary)
    }
}
