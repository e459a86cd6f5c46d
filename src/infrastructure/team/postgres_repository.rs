//! PostgreSQL team and membership repositories

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::team::{
    Team, TeamId, TeamMembership, TeamMembershipRepository, TeamRepository,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name, description FROM teams WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.map(|row| row_to_team(&row)).transpose()
    }
}

/// PostgreSQL implementation of TeamMembershipRepository
#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamMembershipRepository for PostgresMembershipRepository {
    async fn find(
        &self,
        user_id: &UserId,
        team_id: &TeamId,
    ) -> Result<Option<TeamMembership>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, team_id, is_active, is_admin, is_owner
            FROM team_memberships
            WHERE user_id = $1 AND team_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(team_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get team membership: {}", e)))?;

        row.map(|row| row_to_membership(&row)).transpose()
    }
}

fn parse_team_id(raw: String) -> Result<TeamId, DomainError> {
    TeamId::new(raw).map_err(|e| DomainError::storage(format!("Invalid team ID in database: {}", e)))
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let id = parse_team_id(row.get("id"))?;
    let name: String = row.get("name");
    let description: Option<String> = row.get("description");

    let team = Team::new(id, name);

    Ok(match description {
        Some(description) => team.with_description(description),
        None => team,
    })
}

fn row_to_membership(row: &sqlx::postgres::PgRow) -> Result<TeamMembership, DomainError> {
    let user_id: Uuid = row.get("user_id");
    let team_id = parse_team_id(row.get("team_id"))?;

    Ok(TeamMembership::new(UserId::from(user_id), team_id)
        .with_active(row.get("is_active"))
        .with_admin(row.get("is_admin"))
        .with_owner(row.get("is_owner")))
}
