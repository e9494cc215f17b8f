use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;
use crate::teams::repo::{self, TeamRow};
use crate::util::{PageParams, Paginated};

pub fn routes() -> Router<AppState> {
    Router::new().route("/teams", get(list_teams).post(create_team))
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub team_name: Option<String>,
}

/// Without `page`/`limit` this returns every team in one envelope, which is
/// what the team-picker dropdowns consume.
#[instrument(skip(state))]
pub async fn list_teams(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<TeamRow>>, ApiError> {
    if !params.is_paginated() {
        let rows = repo::list_all(&state.db).await?;
        return Ok(Json(Paginated::all(rows)));
    }

    let total = repo::count(&state.db).await?;
    let rows = repo::list(&state.db, params.limit(), params.offset()).await?;
    Ok(Json(Paginated::new(
        rows,
        total,
        params.page(),
        params.limit(),
    )))
}

#[instrument(skip(state, payload))]
pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    auth.require_admin()?;

    let team_name = payload
        .team_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("Team name is required".into()))?;

    if repo::name_exists(&state.db, team_name).await? {
        warn!(%team_name, "duplicate team name");
        return Err(ApiError::Conflict("Team name already exists".into()));
    }

    let id = repo::insert(&state.db, team_name, auth.0.sub).await?;

    info!(team_id = %id, %team_name, created_by = %auth.0.sub, "team created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Team created successfully",
            "data": { "id": id, "team_name": team_name },
        })),
    ))
}
