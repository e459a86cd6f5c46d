//! Team pages guarded by membership requirements

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::api::middleware::Actor;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, TeamPageProps};
use crate::domain::team::TeamMemberRequirements;

pub fn create_teams_router() -> Router<AppState> {
    Router::new()
        .route("/{team_id}", get(team_page))
        .route("/{team_id}/settings/members", get(members_settings_page))
}

pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/authorize", post(authorize))
}

/// Run the guard for one page and shape its outcome for the HTTP layer
pub async fn authorise_page(
    state: &AppState,
    actor: &Actor,
    team_id: &str,
    requirements: &TeamMemberRequirements,
) -> Result<TeamPageProps, ApiError> {
    state
        .guard
        .authorise_by_team_member(actor.as_deref(), team_id, requirements)
        .await
        .map(TeamPageProps::from)
        .map_err(|e| ApiError::from_authorization(e, state.conceal_all_failures))
}

/// GET /teams/{team_id}
async fn team_page(
    State(state): State<AppState>,
    actor: Actor,
    Path(team_id): Path<String>,
) -> Result<Json<TeamPageProps>, ApiError> {
    authorise_page(&state, &actor, &team_id, &TeamMemberRequirements::member())
        .await
        .map(Json)
}

/// GET /teams/{team_id}/settings/members
async fn members_settings_page(
    State(state): State<AppState>,
    actor: Actor,
    Path(team_id): Path<String>,
) -> Result<Json<TeamPageProps>, ApiError> {
    authorise_page(&state, &actor, &team_id, &TeamMemberRequirements::admin())
        .await
        .map(Json)
}

/// Body of `POST /v1/authorize`
#[derive(Debug, Deserialize)]
pub struct AuthorizeRequest {
    pub team_id: String,
    #[serde(default)]
    pub requirements: TeamMemberRequirements,
}

/// Check arbitrary requirements for the calling actor
async fn authorize(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<AuthorizeRequest>,
) -> Result<Json<TeamPageProps>, ApiError> {
    authorise_page(&state, &actor, &request.team_id, &request.requirements)
        .await
        .map(Json)
}
